//! Output formatting for items (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::paapi::Item;

/// Formats items for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single item.
    pub fn format_item(&self, item: &Item) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(item),
            OutputFormat::Table => self.table_single(item),
            OutputFormat::Markdown => self.markdown_single(item),
            OutputFormat::Csv => self.csv_items(std::slice::from_ref(item)),
        }
    }

    /// Formats multiple items.
    pub fn format_items(&self, items: &[Item]) -> String {
        if items.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No items found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_items(items),
            OutputFormat::Table => self.table_items(items),
            OutputFormat::Markdown => self.markdown_items(items),
            OutputFormat::Csv => self.csv_items(items),
        }
    }

    // JSON formatting

    fn json_single(&self, item: &Item) -> String {
        serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_items(&self, items: &[Item]) -> String {
        serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, item: &Item) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ASIN:    {}", item.asin));
        lines.push(format!("Title:   {}", item.title().unwrap_or("N/A")));
        if let Some(url) = &item.detail_page_url {
            lines.push(format!("URL:     {}", url));
        }

        match (item.price(), item.saving_basis()) {
            (Some(price), Some(was)) => {
                lines.push(format!("Price:   {} (was {})", price.display_amount, was.display_amount))
            }
            (Some(price), None) => lines.push(format!("Price:   {}", price.display_amount)),
            (None, _) => lines.push("Price:   N/A".to_string()),
        }

        if let Some((stars, count)) = rating(item) {
            lines.push(format!("Rating:  {:.1}/5 ({} reviews)", stars, count));
        }

        if item.is_prime() {
            lines.push("Badges:  Prime".to_string());
        }

        if let Some(brand) = item.brand() {
            lines.push(format!("Brand:   {}", brand));
        }

        if let Some(parent) = &item.parent_asin {
            lines.push(format!("Parent:  {}", parent));
        }

        for feature in item.features() {
            lines.push(format!("  * {}", feature));
        }

        lines.join("\n")
    }

    fn table_items(&self, items: &[Item]) -> String {
        let asin_width = 10;
        let price_width = 12;
        let prime_width = 5;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<asin_width$}  {:<price_width$}  {:<prime_width$}  {}",
            "ASIN", "Price", "Prime", "Title"
        ));
        lines.push(format!(
            "{:-<asin_width$}  {:-<price_width$}  {:-<prime_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for item in items {
            let price_str = item.price().map(|p| p.display_amount.clone()).unwrap_or("N/A".into());
            let prime_str = if item.is_prime() { "Yes" } else { "No" };
            let title = truncate(item.title().unwrap_or(""), title_width);

            lines.push(format!(
                "{:<asin_width$}  {:>price_width$}  {:<prime_width$}  {}",
                item.asin, price_str, prime_str, title
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} items", items.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, item: &Item) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", Self::markdown_escape(item.title().unwrap_or(&item.asin))));
        lines.push(String::new());

        lines.push(format!("- **ASIN:** {}", item.asin));
        if let Some(url) = &item.detail_page_url {
            lines.push(format!("- **URL:** [View on Amazon]({})", url));
        }

        match (item.price(), item.saving_basis()) {
            (Some(price), Some(was)) => lines.push(format!(
                "- **Price:** {} ~~{}~~",
                price.display_amount, was.display_amount
            )),
            (Some(price), None) => lines.push(format!("- **Price:** {}", price.display_amount)),
            (None, _) => {}
        }

        if let Some((stars, count)) = rating(item) {
            lines.push(format!("- **Rating:** {:.1}/5 ({} reviews)", stars, count));
        }

        if let Some(brand) = item.brand() {
            lines.push(format!("- **Brand:** {}", brand));
        }

        if item.is_prime() {
            lines.push("- **Badges:** ✓ Prime".to_string());
        }

        lines.join("\n")
    }

    fn markdown_items(&self, items: &[Item]) -> String {
        let mut lines = Vec::new();

        lines.push("| ASIN | Price | Prime | Title |".to_string());
        lines.push("|------|-------|-------|-------|".to_string());

        for item in items {
            let price_str = item.price().map(|p| p.display_amount.clone()).unwrap_or("N/A".into());
            let prime_str = if item.is_prime() { "✓" } else { "" };
            let title = Self::markdown_escape(&truncate(item.title().unwrap_or(""), 40));
            let url = item.detail_page_url.as_deref().unwrap_or("");

            lines.push(format!(
                "| {} | {} | {} | [{}]({}) |",
                item.asin, price_str, prime_str, title, url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} items found*", items.len()));

        lines.join("\n")
    }

    /// Backslash-escapes characters that would break a table cell or link text.
    fn markdown_escape(s: &str) -> String {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            if matches!(c, '\\' | '|' | '[' | ']') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "asin,parent_asin,title,price,original_price,currency,rating,reviews,prime,brand,url"
            .to_string()
    }

    fn csv_items(&self, items: &[Item]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for item in items {
            let price = item.price().map(|p| p.amount.to_string()).unwrap_or_default();
            let original = item.saving_basis().map(|p| p.amount.to_string()).unwrap_or_default();
            let currency = item.price().map(|p| p.currency.clone()).unwrap_or_default();
            let (stars, reviews) = rating(item)
                .map(|(s, c)| (s.to_string(), c.to_string()))
                .unwrap_or_default();

            let title = item.title().map(Self::csv_escape).unwrap_or_default();
            let brand = item.brand().map(Self::csv_escape).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{},{}",
                item.asin,
                item.parent_asin.as_deref().unwrap_or(""),
                title,
                price,
                original,
                currency,
                stars,
                reviews,
                item.is_prime(),
                brand,
                item.detail_page_url.as_deref().unwrap_or("")
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn rating(item: &Item) -> Option<(f64, u32)> {
    let reviews = item.customer_reviews.as_ref()?;
    let stars = reviews.star_rating.as_ref()?.value?;
    Some((stars, reviews.count.unwrap_or(0)))
}

/// Shortens `s` to at most `max` characters, ending in "..." when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item() -> Item {
        serde_json::from_str(
            r#"{
                "ASIN": "B08N5WRWNW",
                "DetailPageURL": "https://www.amazon.com/dp/B08N5WRWNW?tag=nager-20",
                "CustomerReviews": {"Count": 1234, "StarRating": {"Value": 4.5}},
                "ItemInfo": {
                    "Title": {"DisplayValue": "Test Product Title"},
                    "ByLineInfo": {"Brand": {"DisplayValue": "TestBrand"}},
                    "Features": {"DisplayValues": ["Fast", "Quiet"]}
                },
                "Offers": {"Listings": [{
                    "Price": {"Amount": 29.99, "Currency": "USD", "DisplayAmount": "$29.99"},
                    "SavingBasis": {"Amount": 39.99, "Currency": "USD", "DisplayAmount": "$39.99"},
                    "DeliveryInfo": {"IsPrimeEligible": true}
                }]}
            }"#,
        )
        .unwrap()
    }

    fn make_bare_item() -> Item {
        Item { asin: "B000000000".to_string(), ..Default::default() }
    }

    #[test]
    fn test_table_single() {
        let output = Formatter::new(OutputFormat::Table).format_item(&make_item());
        assert!(output.contains("ASIN:    B08N5WRWNW"));
        assert!(output.contains("Title:   Test Product Title"));
        assert!(output.contains("Price:   $29.99 (was $39.99)"));
        assert!(output.contains("Rating:  4.5/5 (1234 reviews)"));
        assert!(output.contains("Badges:  Prime"));
        assert!(output.contains("Brand:   TestBrand"));
        assert!(output.contains("  * Quiet"));
    }

    #[test]
    fn test_table_single_without_offers() {
        let output = Formatter::new(OutputFormat::Table).format_item(&make_bare_item());
        assert!(output.contains("Title:   N/A"));
        assert!(output.contains("Price:   N/A"));
        assert!(!output.contains("Rating"));
    }

    #[test]
    fn test_table_items() {
        let output = Formatter::new(OutputFormat::Table)
            .format_items(&[make_item(), make_bare_item()]);
        assert!(output.starts_with("ASIN"));
        assert!(output.contains("$29.99"));
        assert!(output.contains("Total: 2 items"));
    }

    #[test]
    fn test_empty_items() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_items(&[]), "[]");
        assert_eq!(Formatter::new(OutputFormat::Table).format_items(&[]), "No items found.");
        assert!(Formatter::new(OutputFormat::Csv).format_items(&[]).starts_with("asin,"));
    }

    #[test]
    fn test_json_items_use_wire_names() {
        let output = Formatter::new(OutputFormat::Json).format_items(&[make_item()]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["ASIN"], "B08N5WRWNW");
    }

    #[test]
    fn test_markdown_single() {
        let output = Formatter::new(OutputFormat::Markdown).format_item(&make_item());
        assert!(output.starts_with("## Test Product Title"));
        assert!(output.contains("- **Price:** $29.99 ~~$39.99~~"));
        assert!(output.contains("✓ Prime"));
    }

    #[test]
    fn test_markdown_items() {
        let output = Formatter::new(OutputFormat::Markdown).format_items(&[make_item()]);
        assert!(output.contains("| ASIN | Price | Prime | Title |"));
        assert!(output.contains("[Test Product Title](https://www.amazon.com/dp/B08N5WRWNW"));
        assert!(output.contains("*1 items found*"));
    }

    #[test]
    fn test_markdown_escapes_titles() {
        let mut item = make_bare_item();
        item.item_info = serde_json::from_str(r#"{"Title": {"DisplayValue": "Cable | 2m [USB-C]"}}"#).unwrap();

        let formatter = Formatter::new(OutputFormat::Markdown);
        let row = formatter.format_items(std::slice::from_ref(&item));
        assert!(row.contains("[Cable \\| 2m \\[USB-C\\]]("));
        assert_eq!(row.lines().nth(2).unwrap().matches(" | ").count(), 3);

        let single = formatter.format_item(&item);
        assert!(single.starts_with("## Cable \\| 2m \\[USB-C\\]"));
        assert_eq!(Formatter::markdown_escape(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_csv_items() {
        let output = Formatter::new(OutputFormat::Csv).format_items(&[make_item()]);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("B08N5WRWNW,,Test Product Title,29.99,39.99,USD,4.5,1234,true,"));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("plain"), "plain");
        assert_eq!(Formatter::csv_escape("a,b"), "\"a,b\"");
        assert_eq!(Formatter::csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("äöüäöüäöüäöü", 6), "äöü...");
    }
}

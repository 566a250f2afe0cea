//! Endpoint listing.

use crate::paapi::{Endpoint, EndpointConfigRepository};

/// Renders the supported marketplaces with their API host and signing region.
pub fn list_endpoints() -> String {
    let repo = EndpointConfigRepository::new();
    let mut lines = vec![
        "Supported PAAPI endpoints:\n".to_string(),
        format!("{:<6} {:<28} {:<12}", "Code", "Host", "Region"),
        format!("{:-<6} {:-<28} {:-<12}", "", "", ""),
    ];

    for endpoint in Endpoint::all() {
        if let Ok(config) = repo.get(*endpoint) {
            lines.push(format!(
                "{:<6} {:<28} {:<12}",
                endpoint.to_string(),
                config.api_host(),
                config.region
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_endpoints() {
        let output = list_endpoints();
        assert!(output.contains("webservices.amazon.co.uk"));
        assert!(output.contains("eu-west-1"));
        assert!(output.contains("us-west-2"));
        assert_eq!(output.lines().count(), 4 + Endpoint::all().len());
    }
}

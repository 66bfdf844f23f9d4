#[cfg(test)]
mod tests {
    use crate::core::domain::Hertz;
    use crate::io::trunk_recorder::{SourceConfigBuilder, TrunkRecorderConfig, TrunkRecorderConfigBuilder};
    use crate::io::writer::{config_file_name, to_pretty_json, write_site_config};
    use tempfile::TempDir;

    fn document() -> TrunkRecorderConfig {
        TrunkRecorderConfigBuilder::new()
            .source(SourceConfigBuilder::new().center(Hertz::new(851_244_375)).build())
            .build()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(config_file_name(3, "6643"), "3.6643.config.json");
    }

    #[test]
    fn test_four_space_indent() {
        let json = to_pretty_json(&document()).unwrap();
        assert!(json.starts_with("{\n    \"ver\": 2,"));
        assert!(json.contains("\n            \"center\": 851244375,"));
    }

    #[test]
    fn test_non_ascii_text_survives() {
        let config = TrunkRecorderConfigBuilder::new()
            .capture_dir("/srv/Bézier Zähler")
            .build();
        let json = to_pretty_json(&config).unwrap();
        assert!(json.contains("\"captureDir\": \"/srv/Bézier Zähler\""));
    }

    #[test]
    fn test_write_creates_directory_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("configs");

        let path = write_site_config(&output, 1, "6643", &document()).unwrap();
        assert_eq!(path, output.join("1.6643.config.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: TrunkRecorderConfig = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, document());
    }
}

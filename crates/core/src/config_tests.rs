use super::*;

#[test]
fn looks_up_nested_key() {
    let mut default_section = IndexMap::new();
    default_section.insert("zk_server".to_string(), "localhost:2181".to_string());
    let mut sections = IndexMap::new();
    sections.insert("default".to_string(), default_section);
    let config = HealerConfig::new(sections);

    assert_eq!(config.get("default", "zk_server"), Some("localhost:2181"));
    assert_eq!(config.get("default", "missing"), None);
    assert_eq!(config.get("missing-section", "zk_server"), None);
}

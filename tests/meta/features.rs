//! Manifest checks: fixture code stays out of builds that opt out of it

#[cfg(test)]
mod tests {
    use std::fs;

    fn read(path: &str) -> String {
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
    }

    // Tests rand is only pulled in by the synthetic feature
    #[test]
    fn test_rand_is_optional() {
        let manifest = read("Cargo.toml");
        assert!(manifest.contains("synthetic = [\"dep:rand\"]"));
        assert!(manifest.contains("rand = { version = \"0.9\", optional = true }"));
    }

    // Tests the fixture module is compiled only with the synthetic feature
    #[test]
    fn test_synthetic_module_gated() {
        let module_index = read("src/io/mod.rs");
        assert!(module_index.contains("#[cfg(feature = \"synthetic\")]\npub mod synthetic;"));
    }

    // Tests fixture-dependent targets declare the feature they need
    #[test]
    fn test_fixture_targets_require_feature() {
        let manifest = read("Cargo.toml");
        for target in ["name = \"main\"", "name = \"scenarios\"", "name = \"analysis\""] {
            let section = manifest
                .split("\n[")
                .find(|section| section.contains(target))
                .unwrap_or_else(|| panic!("no target section with {target}"));
            assert!(
                section.contains("required-features = [\"synthetic\"]"),
                "{target} does not require the synthetic feature"
            );
        }
    }
}

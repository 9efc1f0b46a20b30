// Kbdlayer Integration Tests
//
// These tests load the sample layouts shipped in `layouts/` and drive the
// full pipeline: descriptor -> Layout -> LayerResolver -> TransformEngine
//
// Run with: cargo test -p kbdlayer-core --test integration_test

mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use kbdlayer_core::{
        fallback_layers, parse_event_string, KeyEvent, LayerResolver, Layout, LayoutError,
        Modifier, ModifierSet, TransformEngine, TransformResult,
    };
    use pretty_assertions::assert_eq;

    fn layouts_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../layouts")
    }

    fn swedish() -> Arc<Layout> {
        Arc::new(Layout::from_path(layouts_dir().join("se.json")).unwrap())
    }

    fn mods(names: &[Modifier]) -> ModifierSet {
        names.iter().copied().collect()
    }

    /// Feed a whitespace-separated list of event strings, collecting commits
    fn type_events(engine: &mut TransformEngine, events: &str) -> String {
        events
            .split_whitespace()
            .filter_map(|exp| engine.resolve(&parse_event_string(exp).unwrap()))
            .collect()
    }

    #[test]
    fn test_sample_layout_loads() {
        let layout = swedish();
        let names: Vec<&str> = layout.layer_names().collect();
        assert_eq!(
            names,
            vec!["default", "shift", "caps", "caps+shift", "alt", "alt+shift", "ctrl"]
        );
        assert!(layout.has_dead_keys());
        assert_eq!(layout.transform_count(), 6);
        assert!(layout.layer("ctrl").unwrap().is_empty());
    }

    #[test]
    fn test_fallback_chain_shapes() {
        assert_eq!(fallback_layers("default").to_vec(), vec!["default"]);
        assert_eq!(fallback_layers("alt+shift").to_vec(), vec!["alt+shift", "shift", "default"]);
        assert_eq!(
            fallback_layers("caps+alt+shift").to_vec(),
            vec!["caps+alt+shift", "caps", "shift", "default"]
        );
    }

    #[test]
    fn test_resolver_against_sample_layout() {
        let resolver = LayerResolver::new(swedish());
        let value = |code: &str, m: &[Modifier]| {
            resolver.resolve(code, &mods(m)).map(|r| r.value)
        };

        assert_eq!(value("KeyE", &[]), Some("e".into()));
        assert_eq!(value("KeyE", &[Modifier::Shift]), Some("E".into()));
        assert_eq!(value("KeyE", &[Modifier::Alt]), Some("€".into()));
        // alt is never a fallback of alt+shift
        assert_eq!(value("KeyE", &[Modifier::Alt, Modifier::Shift]), Some("E".into()));
        // empty ctrl layer falls through to default
        assert_eq!(value("KeyE", &[Modifier::Ctrl]), Some("e".into()));
        // caps+alt is not defined, caps is the first fallback
        assert_eq!(value("KeyA", &[Modifier::Caps, Modifier::Alt]), Some("A".into()));
        assert_eq!(value("KeyA", &[Modifier::Caps, Modifier::Shift]), Some("a".into()));
        assert_eq!(value("F13", &[]), None);
    }

    #[test]
    fn test_space_is_never_inherited() {
        let resolver = LayerResolver::new(swedish());
        let space = |m: &[Modifier]| resolver.resolve("Space", &mods(m)).map(|r| r.value);

        assert_eq!(space(&[]), Some(" ".into()));
        assert_eq!(space(&[Modifier::Shift]), Some("\u{a0}".into()));
        assert_eq!(space(&[Modifier::Caps, Modifier::Shift]), Some(" ".into()));
        assert_eq!(space(&[Modifier::Alt]), Some(" ".into()));
    }

    #[test]
    fn test_resolved_layer_is_the_starting_layer() {
        let resolver = LayerResolver::new(swedish());
        let resolved = resolver
            .resolve("Digit1", &mods(&[Modifier::Alt, Modifier::Shift]))
            .unwrap();
        assert_eq!(resolved.value, "!");
        assert_eq!(resolved.layer, "alt+shift");
    }

    #[test]
    fn test_typing_plain_text() {
        let mut engine = TransformEngine::new(swedish());
        assert_eq!(
            type_events(&mut engine, "shift+KeyH KeyE KeyJ Space KeyQ Quote"),
            "Hej qä"
        );
    }

    #[test]
    fn test_typing_with_dead_keys() {
        let mut engine = TransformEngine::new(swedish());
        assert_eq!(type_events(&mut engine, "KeyC Equal KeyA KeyF KeyE"), "cáfe");
        assert_eq!(type_events(&mut engine, "shift+Equal KeyA"), "à");
        assert_eq!(type_events(&mut engine, "Equal shift+KeyE"), "É");
        assert_eq!(type_events(&mut engine, "alt+BracketRight KeyN"), "ñ");
        assert_eq!(type_events(&mut engine, "alt+shift+BracketRight shift+KeyS"), "Š");
        assert!(!engine.is_armed());
    }

    #[test]
    fn test_caps_layers_carry_their_own_dead_keys() {
        let mut engine = TransformEngine::new(swedish());
        assert_eq!(type_events(&mut engine, "caps+Equal caps+KeyE"), "É");
        assert_eq!(type_events(&mut engine, "caps+shift+Equal caps+shift+KeyE"), "è");
    }

    #[test]
    fn test_dead_key_value_on_foreign_layer_is_plain() {
        let mut engine = TransformEngine::new(swedish());
        // alt+Equal falls back to default's "´", but "´" is not a dead key on alt
        let result = engine.process_event(&parse_event_string("alt+Equal").unwrap());
        assert_eq!(result, TransformResult::Text("´".into()));
        assert!(!engine.is_armed());
    }

    #[test]
    fn test_nested_transform_from_sample_layout() {
        let mut engine = TransformEngine::new(swedish());
        assert_eq!(type_events(&mut engine, "alt+BracketLeft Equal KeyU"), "ǘ");
        assert_eq!(type_events(&mut engine, "alt+BracketLeft Equal Space"), "¨´");
    }

    #[test]
    fn test_dead_key_followed_by_space_or_junk() {
        let mut engine = TransformEngine::new(swedish());
        assert_eq!(type_events(&mut engine, "Equal Space"), "´");
        // the digit is consumed by the abandoned composition
        assert_eq!(type_events(&mut engine, "Equal Digit1 Digit2"), "´2");
    }

    #[test]
    fn test_toml_layout_with_iso_positions() {
        let layout = Arc::new(Layout::from_path(layouts_dir().join("minimal.toml")).unwrap());
        assert_eq!(layout.default_layer().unwrap().get("KeyE"), Some("e"));
        assert_eq!(layout.default_layer().unwrap().get("Equal"), Some("´"));

        let mut engine = TransformEngine::new(Arc::clone(&layout));
        assert_eq!(type_events(&mut engine, "E12 D03 shift+E12 C01"), "éà");
        assert_eq!(type_events(&mut engine, "shift+Space"), "_");
        // empty alt+shift entry is dropped, shift supplies the value
        assert_eq!(type_events(&mut engine, "alt+shift+Digit1"), "!");
    }

    #[test]
    fn test_missing_layout_file() {
        let err = Layout::from_path(layouts_dir().join("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }

    #[test]
    fn test_invalid_descriptors() {
        assert!(matches!(
            Layout::from_json(r#"{ "layers": { "shift": { "KeyA": "A" } } }"#),
            Err(LayoutError::MissingDefaultLayer)
        ));
        assert!(matches!(
            Layout::from_json("{ not json"),
            Err(LayoutError::JsonParse(_))
        ));
        assert!(matches!(
            Layout::from_json(r#"{ "layers": { "default": {} }, "keys": {} }"#),
            Err(LayoutError::JsonParse(_))
        ));
    }

    #[test]
    fn test_engines_share_layout_not_state() {
        let layout = swedish();
        let mut first = TransformEngine::new(Arc::clone(&layout));
        let mut second = TransformEngine::new(Arc::clone(&layout));

        first.process_event(&KeyEvent::new("Equal"));
        assert!(first.is_armed());
        assert!(!second.is_armed());
        assert_eq!(second.resolve(&KeyEvent::new("KeyE")), Some("e".into()));
        assert_eq!(first.resolve(&KeyEvent::new("KeyE")), Some("é".into()));
        assert_eq!(Arc::strong_count(&layout), 3);
    }
}

use typed_json_view::{FieldValue, TypedJsonView};

#[test]
fn test_parse_simple_document() {
    let view = TypedJsonView::parse(
        r#"{
            "name": "My App",
            "version": 1.0,
            "is_enabled": true,
            "features": ["a", "b", "c"],
            "config": {
                "host": "localhost",
                "port": 8080
            }
        }"#,
    )
    .unwrap();

    assert_eq!(view.len(), 5);
    for key in ["name", "version", "is_enabled", "features", "config"] {
        assert!(view.has(key), "expected key {key}");
        assert!(view.get_required_field(key).is_ok());
    }
    assert!(!view.has("missing"));
}

#[test]
fn test_from_value_matches_parse() {
    let text = r#"{"a": 1, "b": [true, null], "c": {"d": "x"}}"#;
    let from_text = TypedJsonView::parse(text).unwrap();
    let from_value =
        TypedJsonView::from_value(serde_json::from_str(text).unwrap()).unwrap();
    assert_eq!(from_text, from_value);
}

#[test]
fn test_from_str_impl_matches_parse() {
    let text = r#"{"a": 1}"#;
    let parsed: TypedJsonView = text.parse().unwrap();
    assert_eq!(parsed, TypedJsonView::parse(text).unwrap());
}

#[test]
fn test_deserialize_impl() {
    let view: TypedJsonView =
        serde_json::from_str(r#"{"kind": "event", "seq": 9}"#).unwrap();
    assert_eq!(view.get_string("kind").unwrap(), "event");
    assert_eq!(view.get_integer("seq").unwrap(), 9);

    let result = serde_json::from_str::<TypedJsonView>("[1, 2, 3]");
    assert!(result.is_err(), "array root should not deserialize");
}

#[test]
fn test_from_serialize() {
    #[derive(serde::Serialize)]
    struct Payload {
        user: String,
        attempts: i64,
    }

    let view = TypedJsonView::from_serialize(&Payload {
        user: "ada".to_string(),
        attempts: 2,
    })
    .unwrap();
    assert_eq!(view.get_string("user").unwrap(), "ada");
    assert_eq!(view.get_integer("attempts").unwrap(), 2);

    // A serializable scalar is still not an object.
    assert!(TypedJsonView::from_serialize(&17i32).is_err());
}

#[test]
fn test_scalars_pass_through_unchanged() {
    let view = TypedJsonView::parse(
        r#"{"s": "text", "i": 42, "f": 2.5, "b": false, "n": null}"#,
    )
    .unwrap();

    assert_eq!(
        view.get_required_field("s").unwrap(),
        &FieldValue::String("text".to_string())
    );
    assert_eq!(view.get_required_field("i").unwrap(), &FieldValue::Integer(42));
    assert_eq!(view.get_required_field("f").unwrap(), &FieldValue::Float(2.5));
    assert_eq!(
        view.get_required_field("b").unwrap(),
        &FieldValue::Boolean(false)
    );
    assert_eq!(view.get_required_field("n").unwrap(), &FieldValue::Null);
}

#[test]
fn test_nested_object_becomes_view() {
    let view = TypedJsonView::parse(r#"{"a": {"b": 1}}"#).unwrap();
    let inner = view.get_object("a").unwrap();
    assert_eq!(inner.get_integer("b").unwrap(), 1);
}

#[test]
fn test_array_of_objects_becomes_views() {
    let view = TypedJsonView::parse(r#"{"items": [{"x": 1}, {"x": 2}]}"#).unwrap();
    let items = view.get_array("items").unwrap();
    assert_eq!(items.len(), 2);
    for (index, item) in items.iter().enumerate() {
        let element = item.as_object().expect("array element should be a view");
        assert_eq!(element.get_integer("x").unwrap(), (index as i64) + 1);
    }
}

#[test]
fn test_deep_nesting_is_fully_wrapped() {
    // Objects inside arrays inside arrays must still end up as views.
    let view =
        TypedJsonView::parse(r#"{"grid": [[{"cell": 1}], [{"cell": 2}, 7]]}"#).unwrap();
    let grid = view.get_array("grid").unwrap();
    let first_row = grid[0].as_array().unwrap();
    assert_eq!(
        first_row[0].as_object().unwrap().get_integer("cell").unwrap(),
        1
    );
    let second_row = grid[1].as_array().unwrap();
    assert!(second_row[0].is_object());
    assert_eq!(second_row[1], FieldValue::Integer(7));
}

#[test]
fn test_field_names_are_enumerable() {
    let view = TypedJsonView::parse(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
    let names: Vec<&str> = view.field_names().collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_views_are_comparable_and_cloneable() {
    let view = TypedJsonView::parse(r#"{"a": {"b": [1, 2]}}"#).unwrap();
    let copy = view.clone();
    assert_eq!(view, copy);
}

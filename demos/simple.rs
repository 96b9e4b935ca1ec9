use typed_json_view::TypedJsonView;

fn main() {
    let payload = r#"
        {
            "user": {
                "name": "John Doe",
                "email": "john.doe@example.com",
                "age": "42"
            },
            "plan": null
        }
    "#;

    match TypedJsonView::parse(payload) {
        Ok(view) => {
            let user = view.get_object("user").unwrap();
            println!("name:  {}", user.get_non_empty_string("name").unwrap());
            println!("email: {}", user.get_email("email").unwrap());
            println!("age:   {}", user.get_integer_greater_than_zero("age").unwrap());
            match view.get_nullable_string("plan").unwrap() {
                Some(plan) => println!("plan:  {plan}"),
                None => println!("plan:  (none)"),
            }
        }
        Err(e) => {
            eprintln!("Failed to read payload: {e:?}");
        }
    }
}

#[cfg(test)]
mod environment_tests {
    use std::rc::Rc;

    use monkey_interpreter as monkey;

    use monkey::environment::Environment;
    use monkey::value::Value;

    #[test]
    fn test_get_missing_name() {
        let env = Environment::new();

        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn test_set_returns_stored_value_and_overwrites() {
        let mut env = Environment::new();

        assert_eq!(env.set("x", Value::Integer(1)), Value::Integer(1));
        env.set("x", Value::Integer(2));

        assert_eq!(env.get("x"), Some(Value::Integer(2)));
    }

    #[test]
    fn test_enclosed_lookup_walks_outer_chain() {
        let root = Environment::new().into_shared();
        root.borrow_mut().set("a", Value::Integer(1));

        let middle = Environment::new_enclosed(Rc::clone(&root)).into_shared();
        middle.borrow_mut().set("b", Value::Integer(2));

        let inner = Environment::new_enclosed(Rc::clone(&middle));

        assert_eq!(inner.get("a"), Some(Value::Integer(1)));
        assert_eq!(inner.get("b"), Some(Value::Integer(2)));
        assert_eq!(inner.get("c"), None);
        assert!(inner.outer().is_some_and(|outer| Rc::ptr_eq(outer, &middle)));
    }

    #[test]
    fn test_set_only_writes_innermost_scope() {
        let root = Environment::new().into_shared();
        root.borrow_mut().set("x", Value::Integer(1));

        let mut inner = Environment::new_enclosed(Rc::clone(&root));
        inner.set("x", Value::Integer(99));

        assert_eq!(inner.get("x"), Some(Value::Integer(99)));
        assert_eq!(root.borrow().get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn test_outer_sees_later_bindings() {
        let root = Environment::new().into_shared();
        let inner = Environment::new_enclosed(Rc::clone(&root));

        root.borrow_mut().set("late", Value::Boolean(true));

        assert_eq!(inner.get("late"), Some(Value::Boolean(true)));
    }
}

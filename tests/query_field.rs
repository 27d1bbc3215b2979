#[cfg(test)]
mod tests {
    use quarry::{Operation, QueryField, Value};
    use std::collections::HashSet;

    #[test]
    fn hash_stability() {
        let field = QueryField::new("Age", Operation::GreaterThan, 21);
        let hash = field.hash_code();
        assert_eq!(field.hash_code(), hash);
        assert_eq!(field.hash_code(), hash);
    }

    #[test]
    fn null_sensitivity() {
        let null = QueryField::equal("X", Value::Null);
        let five = QueryField::equal("X", 5);
        assert_ne!(null, five);
        assert_ne!(null.hash_code(), five.hash_code());
    }

    #[test]
    fn equal_not_equal_null_asymmetry() {
        let is_null = QueryField::new("X", Operation::Equal, Value::Null);
        let is_not_null = QueryField::new("X", Operation::NotEqual, Value::Null);
        assert_ne!(is_null, is_not_null);
    }

    #[test]
    fn typed_null_gates_the_sentinels() {
        let untyped = QueryField::equal("X", Value::Null);
        let typed = QueryField::equal("X", None::<i32>);
        assert_eq!(untyped, typed);
    }

    #[test]
    fn collection_cardinality() {
        let two = QueryField::new("X", Operation::In, vec![1, 2]);
        let three = QueryField::new("X", Operation::In, vec![1, 2, 3]);
        assert_ne!(two, three);
        // Same count, different elements: equal under the hash policy. The
        // parameter contributes its name only, never the bound value.
        let other_two = QueryField::new("X", Operation::In, vec![9, 9]);
        assert_eq!(two, other_two);
    }

    #[test]
    fn in_empty_vs_populated() {
        let empty = QueryField::new("Status", Operation::In, Vec::<i32>::new());
        let one = QueryField::new("Status", Operation::In, vec![1]);
        assert_ne!(empty, one);
    }

    #[test]
    fn mark_for_update_prefixes_every_call() {
        let mut field = QueryField::equal("Age", 18);
        assert_eq!(field.parameter().name(), "Age");
        field.mark_for_update();
        assert_eq!(field.parameter().name(), "_Age");
        field.mark_for_update();
        assert_eq!(field.parameter().name(), "__Age");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut field = QueryField::new("Age", Operation::GreaterThanOrEqual, 18);
        field.mark_for_update();
        field.mark_for_update();
        field.reset();
        assert_eq!(field.parameter().name(), "Age");
        let fresh = QueryField::new("Age", Operation::GreaterThanOrEqual, 18);
        assert_eq!(field.hash_code(), fresh.hash_code());
        assert_eq!(field, fresh);
    }

    #[test]
    fn memoized_hash_survives_rename_until_reset() {
        let mut field = QueryField::equal("Id", 7);
        let before = field.hash_code();
        field.mark_for_update();
        // Already memoized: the rename does not recompute.
        assert_eq!(field.hash_code(), before);
        field.reset();
        assert_eq!(field.hash_code(), before);
    }

    #[test]
    fn operation_text_table() {
        let expected = [
            (Operation::Equal, "="),
            (Operation::NotEqual, "<>"),
            (Operation::LessThan, "<"),
            (Operation::GreaterThan, ">"),
            (Operation::LessThanOrEqual, "<="),
            (Operation::GreaterThanOrEqual, ">="),
            (Operation::Like, "LIKE"),
            (Operation::NotLike, "NOT LIKE"),
            (Operation::Between, "BETWEEN"),
            (Operation::NotBetween, "NOT BETWEEN"),
            (Operation::In, "IN"),
            (Operation::NotIn, "NOT IN"),
            (Operation::All, "AND"),
            (Operation::Any, "OR"),
        ];
        assert_eq!(expected.len(), Operation::VARIANTS.len());
        for (operation, text) in expected {
            let field = QueryField::new("X", operation, 1);
            assert_eq!(field.operation_text(), text, "{operation}");
            // Memoized lookup returns the same token.
            assert_eq!(field.operation_text(), text);
        }
    }

    #[test]
    fn end_to_end() {
        let mut field = QueryField::new("Age", Operation::GreaterThanOrEqual, 18);
        assert_eq!(field.operation_text(), ">=");
        assert_eq!(field.to_string(), "Age = @Age");
        let (name, text, parameter, value) = field.predicate_parts();
        assert_eq!(name, "Age");
        assert_eq!(text, ">=");
        assert_eq!(parameter, "Age");
        assert_eq!(value, &Value::Int32(Some(18)));
        field.mark_for_update();
        assert_eq!(field.parameter().name(), "_Age");
    }

    #[test]
    fn deduplication_by_hash() {
        let mut set = HashSet::new();
        set.insert(QueryField::equal("Id", 1));
        set.insert(QueryField::equal("Id", 2));
        // Same field, operation and parameter name: one entry.
        assert_eq!(set.len(), 1);
        set.insert(QueryField::new("Id", Operation::NotEqual, 1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn typed_parameter_extraction() {
        let field = QueryField::equal("Age", 18);
        let age: i32 = field.parameter().get().unwrap();
        assert_eq!(age, 18);
        let age: i64 = field.parameter().get().unwrap();
        assert_eq!(age, 18);
        assert!(field.parameter().get::<String>().is_err());
    }
}

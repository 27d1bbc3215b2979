#[cfg(test)]
mod tests {
    use quarry::{
        GenericSqlWriter, Operation, QueryField, QueryGroup, SqlWriter, Value,
    };
    use rust_decimal::Decimal;
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    const WRITER: GenericSqlWriter = GenericSqlWriter::new();

    fn render_field(field: &QueryField) -> String {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut out = String::new();
        WRITER.write_query_field(&mut out, field);
        out
    }

    fn render_group(group: &QueryGroup) -> String {
        let mut out = String::new();
        WRITER.write_query_group(&mut out, group);
        out
    }

    fn render_value(value: &Value) -> String {
        let mut out = String::new();
        WRITER.as_dyn().write_value(&mut out, value);
        out
    }

    #[test]
    fn simple_predicate() {
        let field = QueryField::new("Age", Operation::GreaterThanOrEqual, 18);
        assert_eq!(render_field(&field), "\"Age\" >= @Age");
    }

    #[test]
    fn null_predicates() {
        let field = QueryField::equal("MiddleName", Value::Null);
        assert_eq!(render_field(&field), "\"MiddleName\" IS NULL");
        let field = QueryField::new("MiddleName", Operation::NotEqual, None::<String>);
        assert_eq!(render_field(&field), "\"MiddleName\" IS NOT NULL");
    }

    #[test]
    fn in_predicates() {
        let field = QueryField::new("Status", Operation::In, vec![1, 2, 3]);
        assert_eq!(
            render_field(&field),
            "\"Status\" IN (@Status_In_0, @Status_In_1, @Status_In_2)"
        );
        let field = QueryField::new("Status", Operation::NotIn, vec![1]);
        assert_eq!(render_field(&field), "\"Status\" NOT IN (@Status_In_0)");
        let field = QueryField::new("Status", Operation::In, Vec::<i32>::new());
        assert_eq!(render_field(&field), "\"Status\" IN ()");
    }

    #[test]
    fn between_predicates() {
        let field = QueryField::new("Age", Operation::Between, vec![18, 65]);
        assert_eq!(
            render_field(&field),
            "\"Age\" BETWEEN @Age_Left AND @Age_Right"
        );
        let field = QueryField::new("Age", Operation::NotBetween, vec![18, 65]);
        assert_eq!(
            render_field(&field),
            "\"Age\" NOT BETWEEN @Age_Left AND @Age_Right"
        );
    }

    #[test]
    fn renamed_parameter_flows_into_placeholders() {
        let mut field = QueryField::equal("Age", 18);
        field.mark_for_update();
        assert_eq!(render_field(&field), "\"Age\" = @_Age");
    }

    #[test]
    fn identifier_quoting() {
        let field = QueryField::equal("Weird\"Name", 1);
        assert_eq!(render_field(&field), "\"Weird\"\"Name\" = @Weird\"Name");
    }

    #[test]
    fn group_rendering() {
        let group = QueryGroup::or([
            QueryField::new("FirstName", Operation::Like, "Jo%"),
            QueryField::new("LastName", Operation::Like, "Jo%"),
        ]);
        assert_eq!(
            render_group(&group),
            "(\"FirstName\" LIKE @FirstName OR \"LastName\" LIKE @LastName)"
        );
    }

    #[test]
    fn nested_group_rendering() {
        let mut group = QueryGroup::and([QueryField::equal("Id", 1)]);
        group.add_group(QueryGroup::or([
            QueryField::equal("A", 1),
            QueryField::equal("B", 2),
        ]));
        assert_eq!(
            render_group(&group),
            "(\"Id\" = @Id AND (\"A\" = @A OR \"B\" = @B))"
        );
    }

    #[test]
    fn empty_group_renders_nothing() {
        assert_eq!(render_group(&QueryGroup::and([])), "");
        let mut deep = QueryGroup::and([]);
        deep.add_group(QueryGroup::or([]));
        assert_eq!(render_group(&deep), "");
    }

    #[test]
    fn empty_nested_group_leaves_no_dangling_conjunction() {
        let mut group = QueryGroup::and([QueryField::equal("Id", 1)]);
        group.add_group(QueryGroup::or([]));
        assert_eq!(render_group(&group), "(\"Id\" = @Id)");
        // A nested group that only contains empty groups is just as empty.
        let mut nested = QueryGroup::or([]);
        nested.add_group(QueryGroup::and([]));
        let mut group = QueryGroup::and([QueryField::equal("Id", 1)]);
        group.add_group(nested);
        group.add_group(QueryGroup::or([QueryField::equal("Age", 2)]));
        assert_eq!(render_group(&group), "(\"Id\" = @Id AND (\"Age\" = @Age))");
    }

    #[test]
    fn value_literals() {
        assert_eq!(render_value(&Value::Null), "NULL");
        assert_eq!(render_value(&Value::Varchar(None)), "NULL");
        assert_eq!(render_value(&Value::Boolean(Some(true))), "true");
        assert_eq!(render_value(&Value::Int32(Some(-42))), "-42");
        assert_eq!(render_value(&Value::UInt64(Some(18446744073709551615))), "18446744073709551615");
        assert_eq!(render_value(&Value::Float64(Some(1.5))), "1.5");
        assert_eq!(
            render_value(&Value::Varchar(Some("O'Brien".into()))),
            "'O''Brien'"
        );
        assert_eq!(
            render_value(&Decimal::new(1250, 2).into()),
            "12.50"
        );
        assert_eq!(render_value(&date!(2024 - 05 - 17).into()), "'2024-05-17'");
        assert_eq!(render_value(&time!(08:30:00).into()), "'08:30:00.0'");
        assert_eq!(
            render_value(&datetime!(2024-05-17 08:30:00).into()),
            "'2024-05-17T08:30:00.0'"
        );
        assert_eq!(
            render_value(&Uuid::nil().into()),
            "'00000000-0000-0000-0000-000000000000'"
        );
        assert_eq!(render_value(&vec![1, 2, 3].into()), "(1, 2, 3)");
        assert_eq!(
            render_value(&Value::Blob(Some(Box::new([0xAB, 0x01])))),
            "'\\xAB\\x1'"
        );
    }

    #[test]
    fn predicate_parts_agree_with_rendering() {
        let field = QueryField::new("Age", Operation::LessThan, 30);
        let (name, text, parameter, value) = field.predicate_parts();
        assert_eq!(
            render_field(&field),
            format!("\"{}\" {} @{}", name, text, parameter)
        );
        assert_eq!(value, &Value::Int32(Some(30)));
    }
}

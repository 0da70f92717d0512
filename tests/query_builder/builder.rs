use pagequery_core::error::ContractViolation;
use pagequery_core::query_builder::{
    Condition, FetchJoin, Operand, Parameters, Predicate, QueryBuilder, SqlValue,
};

#[test]
fn test_or_predicate_is_parenthesized_and_anded() {
    let mut params = Parameters::new();
    params.bind("customer", "acme");

    let statement = QueryBuilder::new("orders", "root")
        .select(&["root.id"])
        .where_predicate(Predicate::or(vec![
            Condition::Compare {
                field: "root.status".to_string(),
                operator: "=".to_string(),
                operand: Operand::literal("open"),
            },
            Condition::IsNull {
                field: "root.placed_on".to_string(),
            },
        ]))
        .where_predicate(Predicate::eq_param("root.customer", "customer"))
        .build(&params)
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT root.id FROM orders root WHERE (root.status = $1 OR root.placed_on IS NULL) AND root.customer = $2"
    );
    assert_eq!(statement.binds, vec![SqlValue::from("open"), SqlValue::from("acme")]);
}

#[test]
fn test_fetch_join_columns_are_aliased() {
    let statement = QueryBuilder::new("orders", "root")
        .fetch_join(
            FetchJoin::to_many("line_items", "line_items", "li", "li.order_id = root.id")
                .columns(&["sku"]),
        )
        .where_any_of_bound_array("root.id")
        .build(&Parameters::new())
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT root.*, li.sku AS \"li__sku\" FROM orders root LEFT JOIN line_items li ON li.order_id = root.id WHERE root.id = ANY($1)"
    );
    assert!(statement.binds.is_empty());
}

#[test]
fn test_empty_in_list_matches_nothing() {
    let statement = QueryBuilder::new("orders", "root")
        .select_count()
        .where_predicate(Predicate::in_list("root.status", Vec::new()))
        .build(&Parameters::new())
        .unwrap();

    assert_eq!(statement.sql, "SELECT COUNT(*) FROM orders root WHERE 1=0");
}

#[test]
fn test_unbound_parameter_fails_to_render() {
    let result = QueryBuilder::new("orders", "root")
        .where_predicate(Predicate::eq_param("root.customer", "customer"))
        .build(&Parameters::new());

    assert_eq!(
        result,
        Err(ContractViolation::UnboundParameter {
            name: "customer".to_string()
        })
    );
}

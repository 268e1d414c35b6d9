use sqlqb::{
    BuilderConfig, Combinator, Connection, ConnectionProvider, Filter, JoinKind, JoinOn, Literal,
    MySqlConnection, QbError, QueryBuilder, TableRef, qb,
};
use std::sync::Arc;

struct App {
    connection: Arc<dyn Connection>,
}

impl ConnectionProvider for App {
    fn connection(&self) -> Arc<dyn Connection> {
        self.connection.clone()
    }
}

fn users() -> QueryBuilder {
    let mut qb = QueryBuilder::new();
    qb.select(["id", "name", "email"])
        .unwrap()
        .from_as("users", "u")
        .unwrap();
    qb
}

#[test]
fn search_page_query() -> Result<(), QbError> {
    let mut qb = users();
    qb.left_join("profiles", "u", ("user_id", "id"))?
        .add_select([("bio", "profiles.bio")])?
        .order_by([("name", "asc"), ("id", "desc")], None)?
        .limit(25, Some(50))?;
    qb.where_contains("name", "ann")?
        .where_not_null("email")?
        .where_group(|c| {
            c.where_in("u.status", ["active", "invited"])?
                .or_where_length_op("name", ">", 10)?;
            Ok(())
        })?;

    assert_eq!(
        qb.sql(),
        "SELECT `id`,`name`,`email`,`profiles`.`bio` AS `bio` FROM `users` AS `u` \
         LEFT JOIN `profiles` ON `profiles`.`user_id`=`u`.`id` \
         WHERE (`name` LIKE '%ann%' AND `email` IS NOT NULL \
         AND (`u`.`status` IN ('active','invited') OR LENGTH(`name`) > 10)) \
         ORDER BY `name` ASC,`id` DESC LIMIT 50,25"
    );
    Ok(())
}

#[test]
fn pattern_family() -> Result<(), QbError> {
    let mut qb = QueryBuilder::new();
    qb.where_starts_with("a", "x")?
        .where_ends_with("b", "y")?
        .where_not_contains("c", "z")?
        .where_not_ends_with_map([("d", "w")])?;
    assert_eq!(
        qb.sql(),
        "SELECT * WHERE (`a` LIKE 'x%' AND `b` LIKE '%y' \
         AND `c` NOT LIKE '%z%' AND `d` NOT LIKE '%w')"
    );
    Ok(())
}

#[test]
fn or_map_variants() -> Result<(), QbError> {
    let mut qb = QueryBuilder::new();
    qb.where_eq("a", 1)?
        .or_where_in_map([("b", vec![1, 2]), ("c", vec![3])])?;
    assert_eq!(
        qb.sql(),
        "SELECT * WHERE (`a` = 1 OR `b` IN (1,2) OR `c` IN (3))"
    );
    Ok(())
}

#[test]
fn join_error_kinds() {
    let mut qb = users();
    assert!(
        qb.left_join("orders", "users", ("user_id", "id"))
            .unwrap_err()
            .is_orphaned_join()
    );
    assert!(
        qb.left_join_as("orders", "u", "u", ("user_id", "id"))
            .unwrap_err()
            .is_duplicate()
    );
    assert!(
        qb.inner_join("orders", "u", ("user_id", "~", "id"))
            .unwrap_err()
            .is_invalid_operator()
    );
    assert!(
        qb.raw_inner_join("", "o", "u", ("user_id", "id"))
            .unwrap_err()
            .is_invalid_argument()
    );
    assert_eq!(qb.table_names(), vec!["u"]);
}

#[test]
fn generic_join_with_pairs() -> Result<(), QbError> {
    let mut qb = users();
    qb.join(
        JoinKind::Right,
        TableRef::aliased("orders", "o")?,
        "u",
        JoinOn::pairs([("user_id", "id"), ("tenant_id", "tenant_id")], Combinator::Or),
    )?;
    assert_eq!(
        qb.sql(),
        "SELECT `id`,`name`,`email` FROM `users` AS `u` \
         RIGHT JOIN `orders` AS `o` ON `o`.`user_id`=`u`.`id` OR `o`.`tenant_id`=`u`.`tenant_id`"
    );
    Ok(())
}

#[test]
fn provider_supplies_connection() -> Result<(), QbError> {
    let app = App {
        connection: Arc::new(MySqlConnection),
    };
    let mut qb = QueryBuilder::from_provider(&app);
    qb.where_eq("path", "C:\\tmp")?;
    assert_eq!(qb.sql(), "SELECT * WHERE (`path` = 'C:\\\\tmp')");
    Ok(())
}

#[test]
fn free_functions() -> Result<(), QbError> {
    let mut qb = qb::select_from("orders")?;
    qb.where_op("total", ">=", 100)?;
    assert_eq!(qb.sql(), "SELECT * FROM `orders` WHERE (`total` >= 100)");
    assert_eq!(sqlqb::select(["a", "b"])?.sql(), "SELECT `a`,`b`");
    Ok(())
}

#[test]
fn option_values_become_null() -> Result<(), QbError> {
    let mut qb = QueryBuilder::new();
    qb.where_eq("a", Some(3))?.where_eq("b", None::<i32>)?;
    assert_eq!(qb.sql(), "SELECT * WHERE (`a` = 3 AND `b` = NULL)");
    Ok(())
}

#[test]
fn config_from_json() {
    let config: BuilderConfig = serde_json::from_str(
        r#"{"log_sql": true, "sql_log_level": "info", "max_in_list": 3}"#,
    )
    .unwrap();
    assert!(config.log_sql);
    assert_eq!(config.sql_log_level, tracing::Level::INFO);
    assert_eq!(config.max_sql_length, Some(200));

    let mut qb = QueryBuilder::new().with_config(config);
    assert!(qb.where_in("a", [1, 2, 3, 4]).is_err());
    assert!(qb.where_in("a", [1, 2, 3]).is_ok());
}

#[test]
fn literal_list_from_json_values() -> Result<(), QbError> {
    let values = Literal::list_from_json(&serde_json::json!([1, 2.5, "x", true]))?;
    let mut qb = QueryBuilder::new();
    qb.where_not_in("v", values)?;
    assert_eq!(qb.sql(), "SELECT * WHERE (`v` NOT IN (1,2.5,'x',1))");
    Ok(())
}

#[test]
fn clone_is_independent() -> Result<(), QbError> {
    let mut base = users();
    base.where_eq("id", 1)?;
    let mut page = base.clone();
    page.limit(10, None)?;
    assert_eq!(
        base.sql(),
        "SELECT `id`,`name`,`email` FROM `users` AS `u` WHERE (`id` = 1)"
    );
    assert_eq!(
        page.sql(),
        "SELECT `id`,`name`,`email` FROM `users` AS `u` WHERE (`id` = 1) LIMIT 10"
    );
    Ok(())
}

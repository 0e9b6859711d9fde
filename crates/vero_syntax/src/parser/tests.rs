#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on correctness of specific syntactic forms and on the parser’s
/// error recovery behavior (avoiding cascaded errors).
mod tests {
    use super::*;
    use crate::diagnostics::ParseErrorKind;
    use crate::lexer;

    fn parse_str(source: &str) -> ParseResult {
        let tokens = lexer::lex(source).unwrap_or_else(|errs| panic!("lex failed: {errs:?}"));
        parse(&tokens)
    }

    fn parse_ok(source: &str) -> Program {
        let result = parse_str(source);
        assert!(result.errors.is_empty(), "unexpected errors: {:#?}", result.errors);
        result.ast
    }

    fn scenario(body: &str) -> ScenarioNode {
        let mut program = parse_ok(&format!("FEATURE F {{ SCENARIO \"s\" {{ {body} }} }}"));
        program.features.remove(0).scenarios.remove(0)
    }

    fn statements(body: &str) -> Vec<Statement> {
        scenario(body).statements.into_iter().map(|s| s.node).collect()
    }

    fn statement(body: &str) -> Statement {
        let mut all = statements(body);
        assert_eq!(all.len(), 1, "expected one statement in {body:?}, got {all:#?}");
        all.remove(0)
    }

    fn field(name: &str) -> TargetNode {
        TargetNode::Field {
            page: None,
            field: name.to_string(),
        }
    }

    fn string(value: &str) -> Expression {
        Expression::StringLiteral(value.to_string())
    }

    fn var(name: &str) -> Expression {
        Expression::VariableReference {
            page: None,
            name: name.to_string(),
        }
    }

    fn eq(column: &str, value: Expression) -> DataCondition {
        DataCondition::comparison(column, ComparisonOperator::Eq, ConditionValue::Single(value))
    }

    fn rows_query(source: &str) -> DataQuery {
        match statement(source) {
            Statement::Rows { query, .. } => query,
            other => panic!("expected ROWS, got {other:?}"),
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn test_string_only_field_is_auto_selector() {
        let program = parse_ok(r#"PAGE Login { FIELD email = "Email" }"#);
        assert_eq!(program.pages.len(), 1);
        let page = &program.pages[0];
        assert_eq!(page.name, "Login");
        assert_eq!(page.fields.len(), 1);
        assert_eq!(page.fields[0].name, "email");
        assert_eq!(page.fields[0].selector, SelectorNode::new(SelectorType::Auto, "Email"));
    }

    #[test]
    fn test_missing_page_name_reports_and_continues() {
        let result = parse_str("PAGE { } FEATURE Next { }");
        assert_eq!(result.errors.len(), 1, "{:#?}", result.errors);
        assert_eq!(result.errors[0].kind, ParseErrorKind::ExpectedToken);
        assert!(result.errors[0].message.starts_with("Expected page name"));
        assert_eq!(result.ast.pages.len(), 1);
        assert_eq!(result.ast.pages[0].name, "");
        assert_eq!(result.ast.features.len(), 1);
        assert_eq!(result.ast.features[0].name, "Next");
    }

    #[test]
    fn test_page_members() {
        let program = parse_ok(
            r#"
PAGE Checkout ("/checkout", "/cart/*") {
    FIELD pay = BUTTON "Pay now"
    FIELD heading = TEXT EXACT "Your order"
    FIELD menu = ROLE "menuitem" NAME "Settings"
    FIELD country = CSS "select.country"
    TEXT greeting = "hello"
    NUMBER retries = 3
    FLAG debug = false

    fillAddress WITH street, city {
        FILL "Street" WITH street
        SET full = city
    }
}
"#,
        );
        let page = &program.pages[0];
        assert_eq!(page.url_patterns, vec!["/checkout", "/cart/*"]);
        assert_eq!(page.fields.len(), 4);
        assert_eq!(page.fields[0].selector, SelectorNode::new(SelectorType::Button, "Pay now"));
        assert_eq!(page.fields[1].selector.selector_type, SelectorType::TextExact);
        assert_eq!(page.fields[2].selector.name_param.as_deref(), Some("Settings"));
        assert_eq!(page.fields[3].name, "country");

        let types: Vec<_> = page.variables.iter().map(|v| v.var_type).collect();
        assert_eq!(types, vec![VariableType::Text, VariableType::Number, VariableType::Flag]);
        assert_eq!(page.variables[1].value, Expression::NumberLiteral(3.0));

        let action = &page.actions[0];
        assert_eq!(action.name, "fillAddress");
        assert_eq!(action.parameters, vec!["street", "city"]);
        assert_eq!(action.statements.len(), 2);
        assert_eq!(action.variables, vec!["city", "full", "street"]);
    }

    #[test]
    fn test_page_actions() {
        let program = parse_ok(
            r#"
PAGEACTIONS LoginActions FOR LoginPage {
    login WITH user, pass {
        FILL LoginPage.email WITH user
        FILL LoginPage.password WITH pass
        CLICK LoginPage.submit
    }
    logout {
        CLICK "Sign out"
    }
}
"#,
        );
        let actions = &program.page_actions[0];
        assert_eq!(actions.name, "LoginActions");
        assert_eq!(actions.for_page, "LoginPage");
        assert_eq!(actions.actions.len(), 2);
        assert_eq!(
            actions.actions[0].statements[2].node,
            Statement::Click {
                target: TargetNode::Field {
                    page: Some("LoginPage".to_string()),
                    field: "submit".to_string()
                }
            }
        );
    }

    #[test]
    fn test_feature_annotations_tags_hooks_and_fixtures() {
        let program = parse_ok(
            r#"
@skip @smoke
FEATURE Checkout {
    USE FIXTURE cart WITH items = 3, currency = "EUR"
    BEFORE EACH { OPEN "/" }
    AFTER ALL { LOG "done" }

    @slow @only
    SCENARIO "pay by card" @regression {
        CLICK "Pay"
    }
    SCENARIO Refund { }
}
"#,
        );
        let feature = &program.features[0];
        assert_eq!(feature.annotations, vec![Annotation::Skip]);
        assert_eq!(feature.tags, vec!["smoke"]);
        assert_eq!(feature.fixtures.len(), 1);
        assert_eq!(feature.fixtures[0].name, "cart");
        assert_eq!(feature.fixtures[0].options.len(), 2);
        assert_eq!(feature.fixtures[0].options[1].value, string("EUR"));

        let hooks: Vec<_> = feature.hooks.iter().map(|h| h.kind).collect();
        assert_eq!(hooks, vec![HookKind::BeforeEach, HookKind::AfterAll]);

        let pay = &feature.scenarios[0];
        assert_eq!(pay.name, "pay by card");
        assert_eq!(pay.annotations, vec![Annotation::Slow, Annotation::Only]);
        assert_eq!(pay.tags, vec!["regression"]);
        assert_eq!(feature.scenarios[1].name, "Refund");
    }

    #[test]
    fn test_feature_level_slow_becomes_tag() {
        let program = parse_ok("@slow @serial FEATURE F { }");
        assert_eq!(program.features[0].annotations, vec![Annotation::Serial]);
        assert_eq!(program.features[0].tags, vec!["slow"]);
    }

    #[test]
    fn test_fixture_declaration() {
        let program = parse_ok(
            r#"
FIXTURE database {
    SCOPE WORKER
    DEPENDS ON config, network
    AUTO
    OPTION seed DEFAULT 42
    SETUP { LOG "connect" }
    TEARDOWN { LOG "disconnect" }
}
"#,
        );
        let fixture = &program.fixtures[0];
        assert_eq!(fixture.name, "database");
        assert_eq!(fixture.scope, FixtureScope::Worker);
        assert!(fixture.auto);
        assert_eq!(fixture.dependencies, vec!["config", "network"]);
        assert_eq!(fixture.options[0].name, "seed");
        assert_eq!(fixture.options[0].default, Expression::NumberLiteral(42.0));
        assert_eq!(fixture.setup.len(), 1);
        assert_eq!(fixture.teardown.len(), 1);
    }

    #[test]
    fn test_use_page_is_a_migration_error() {
        let result = parse_str(r#"FEATURE F { USE LoginPage SCENARIO "s" { CLICK x } }"#);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::Migration);
        assert!(result.errors[0].message.contains("has been removed"));
        assert!(result.errors[0].help.is_some());
        assert_eq!(result.ast.features[0].scenarios.len(), 1);
        assert_eq!(result.ast.features[0].scenarios[0].statements.len(), 1);
    }

    // ========================================================================
    // Selectors and targets
    // ========================================================================

    #[test]
    fn test_modifiers_keep_source_order() {
        let program =
            parse_ok(r#"PAGE P { FIELD row = CSS ".row" FIRST WITH TEXT "Alice" NTH 2 HAS NOT BUTTON "Edit" LAST }"#);
        let selector = &program.pages[0].fields[0].selector;
        let mut edit = SelectorNode::new(SelectorType::Button, "Edit");
        edit.modifiers.push(SelectorModifier::Last);
        assert_eq!(
            selector.modifiers,
            vec![
                SelectorModifier::First,
                SelectorModifier::WithText("Alice".to_string()),
                SelectorModifier::Nth(2),
                SelectorModifier::HasNot(Box::new(edit)),
            ]
        );
    }

    #[test]
    fn test_target_priority() {
        assert_eq!(
            statement(r#"CLICK "Save""#),
            Statement::Click {
                target: TargetNode::Text("Save".to_string())
            }
        );
        assert!(matches!(
            statement(r#"CLICK "Save" LAST"#),
            Statement::Click { target: TargetNode::Selector(SelectorNode { selector_type: SelectorType::Auto, .. }) }
        ));
        assert!(matches!(
            statement(r#"CLICK LINK "Home""#),
            Statement::Click { target: TargetNode::Selector(SelectorNode { selector_type: SelectorType::Link, .. }) }
        ));
        // A selector word without a value string is a field reference.
        assert_eq!(statement("CLICK button"), Statement::Click { target: field("button") });
        assert_eq!(
            statement("CLICK Cart.checkout"),
            Statement::Click {
                target: TargetNode::Field {
                    page: Some("Cart".to_string()),
                    field: "checkout".to_string()
                }
            }
        );
    }

    #[test]
    fn test_fill_with_is_not_a_text_filter() {
        assert_eq!(
            statement("FILL email WITH text"),
            Statement::Fill {
                target: field("email"),
                value: var("text")
            }
        );
        assert!(matches!(
            statement(r#"FILL "Row" WITH TEXT "a" WITH "b""#),
            Statement::Fill { target: TargetNode::Selector(_), value: Expression::StringLiteral(_) }
        ));
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_navigation_and_interaction() {
        let all = statements(
            r#"
            OPEN "/home"
            OPEN {{BASE_URL}} IN NEW TAB
            DOUBLE CLICK "Row"
            RIGHT CLICK "Row"
            CHECK terms
            UNCHECK newsletter
            SELECT "Spain" FROM country
            HOVER menu
            CLEAR search
            FOCUS search
            PRESS "Enter"
            SCROLL TO footer
            SCROLL DOWN
            SCROLL RIGHT
            UPLOAD "a.png", "b.png" TO avatar
            DRAG card TO column
            REFRESH
            GO BACK
            GO FORWARD
            SWITCH TO TAB 2
            CLOSE TAB
            "#,
        );
        assert_eq!(all.len(), 21);
        assert_eq!(
            all[1],
            Statement::OpenInNewTab {
                url: Expression::EnvVarReference {
                    name: "BASE_URL".to_string()
                }
            }
        );
        assert_eq!(
            all[6],
            Statement::Select {
                option: string("Spain"),
                target: field("country")
            }
        );
        assert_eq!(
            all[12],
            Statement::Scroll {
                to: ScrollTarget::Direction(ScrollDirection::Down)
            }
        );
        assert_eq!(
            all[13],
            Statement::Scroll {
                to: ScrollTarget::Direction(ScrollDirection::Right)
            }
        );
        assert!(matches!(&all[14], Statement::Upload { files, .. } if files.len() == 2));
        assert_eq!(all[17], Statement::GoBack);
        assert_eq!(
            all[19],
            Statement::SwitchTab {
                tab: Expression::NumberLiteral(2.0)
            }
        );
        assert_eq!(all[20], Statement::CloseTab);
    }

    #[test]
    fn test_wait_forms() {
        let all = statements(
            r#"
            WAIT 2
            WAIT 500 MILLISECONDS
            WAIT FOR NAVIGATION
            WAIT FOR NETWORK IDLE
            WAIT FOR URL CONTAINS "/done"
            WAIT FOR spinner IS HIDDEN
            WAIT FOR "Welcome"
            "#,
        );
        assert_eq!(
            all[0],
            Statement::Wait {
                duration: Expression::NumberLiteral(2.0),
                unit: TimeUnit::Seconds
            }
        );
        assert!(matches!(all[1], Statement::Wait { unit: TimeUnit::Milliseconds, .. }));
        assert_eq!(all[2], Statement::WaitForNavigation);
        assert_eq!(all[3], Statement::WaitForNetworkIdle);
        assert_eq!(
            all[4],
            Statement::WaitForUrl {
                condition: TextMatch::Contains,
                value: string("/done")
            }
        );
        assert_eq!(
            all[5],
            Statement::WaitForElement {
                target: field("spinner"),
                state: Some(ElementState::Hidden)
            }
        );
        assert!(matches!(all[6], Statement::WaitForElement { state: None, .. }));
    }

    #[test]
    fn test_verify_url() {
        assert_eq!(
            statement(r#"VERIFY url CONTAINS "/dashboard""#),
            Statement::VerifyUrl {
                condition: TextMatch::Contains,
                value: string("/dashboard")
            }
        );
        assert!(matches!(
            statement(r#"VERIFY TITLE MATCHES "^Home""#),
            Statement::VerifyTitle { condition: TextMatch::Matches, .. }
        ));
    }

    #[test]
    fn test_verify_disambiguation() {
        assert_eq!(
            statement("VERIFY loggedIn IS TRUE"),
            Statement::VerifyVariable {
                name: "loggedIn".to_string(),
                check: VariableCheck::IsTrue
            }
        );
        assert_eq!(
            statement(r#"VERIFY greeting EQUALS "hi""#),
            Statement::VerifyVariable {
                name: "greeting".to_string(),
                check: VariableCheck::Equals(string("hi"))
            }
        );
        assert_eq!(
            statement("VERIFY email IS VISIBLE"),
            Statement::VerifyState {
                target: field("email"),
                negated: false,
                state: ElementState::Visible
            }
        );
        assert!(matches!(
            statement(r#"VERIFY BUTTON "Save" IS NOT ENABLED"#),
            Statement::VerifyState { negated: true, state: ElementState::Enabled, .. }
        ));
        assert!(matches!(
            statement(r#"VERIFY Login.error CONTAINS "bad""#),
            Statement::VerifyContent { target: TargetNode::Field { .. }, negated: false, .. }
        ));
        assert!(matches!(
            statement(r#"VERIFY "Banner" NOT CONTAINS "sale""#),
            Statement::VerifyContent { negated: true, .. }
        ));
    }

    #[test]
    fn test_has_reads_as_assertion_in_verify() {
        assert_eq!(
            statement(r#"VERIFY "Card" HAS TEXT "Paid""#),
            Statement::VerifyContent {
                target: TargetNode::Text("Card".to_string()),
                negated: false,
                assertion: ContentAssertion::HasText { value: string("Paid") }
            }
        );
        assert!(matches!(
            statement(r#"VERIFY items HAS COUNT 3"#),
            Statement::VerifyContent { assertion: ContentAssertion::HasCount { .. }, .. }
        ));
        assert_eq!(
            statement(r#"VERIFY link HAS ATTRIBUTE "href" EQUALS "/home""#),
            Statement::VerifyContent {
                target: field("link"),
                negated: false,
                assertion: ContentAssertion::HasAttribute {
                    name: string("href"),
                    value: Some(string("/home"))
                }
            }
        );
    }

    #[test]
    fn test_verify_response_and_screenshot() {
        assert_eq!(
            statement("VERIFY RESPONSE STATUS EQUALS 200"),
            Statement::VerifyResponse {
                check: ResponseCheck::Status(Expression::NumberLiteral(200.0))
            }
        );
        assert!(matches!(
            statement(r#"VERIFY RESPONSE BODY CONTAINS "ok""#),
            Statement::VerifyResponse { check: ResponseCheck::BodyContains(_) }
        ));
        assert_eq!(
            statement(r#"VERIFY SCREENSHOT OF header AS "header.png""#),
            Statement::VerifyScreenshot {
                target: Some(field("header")),
                name: Some(string("header.png"))
            }
        );
    }

    #[test]
    fn test_output_and_dialogs() {
        let all = statements(
            r#"
            TAKE SCREENSHOT
            TAKE SCREENSHOT AS "page.png"
            LOG "hello"
            FAIL "boom"
            ACCEPT DIALOG WITH "yes"
            DISMISS DIALOG
            "#,
        );
        assert_eq!(
            all[0],
            Statement::TakeScreenshot {
                target: None,
                filename: None
            }
        );
        assert!(matches!(all[1], Statement::TakeScreenshot { filename: Some(_), .. }));
        assert_eq!(
            all[4],
            Statement::AcceptDialog {
                response: Some(string("yes"))
            }
        );
        assert_eq!(all[5], Statement::DismissDialog);
    }

    #[test]
    fn test_perform_get_and_bindings() {
        let node = scenario(
            r#"
            PERFORM LoginActions.login WITH "user", {{PASSWORD}}
            GET TEXT OF "Total" AS total
            GET ATTRIBUTE "href" OF link AS target
            SET copy = total
            "#,
        );
        assert_eq!(
            node.statements[0].node,
            Statement::Perform {
                page: Some("LoginActions".to_string()),
                action: "login".to_string(),
                arguments: vec![
                    string("user"),
                    Expression::EnvVarReference {
                        name: "PASSWORD".to_string()
                    }
                ]
            }
        );
        assert!(matches!(
            &node.statements[2].node,
            Statement::Get { property: ElementProperty::Attribute(name), .. } if name == "href"
        ));
        assert_eq!(node.variables, vec!["copy", "target", "total"]);
    }

    #[test]
    fn test_if_forms() {
        assert!(matches!(
            statement("IF loggedIn { LOG \"yes\" }"),
            Statement::If { condition: BooleanExpression::VariableTruthy { .. }, else_branch: None, .. }
        ));
        assert_eq!(
            statement("IF attempts > 5 { }"),
            Statement::If {
                condition: BooleanExpression::Comparison {
                    left: var("attempts"),
                    operator: ComparisonOperator::Gt,
                    right: Expression::NumberLiteral(5.0)
                },
                then_branch: vec![],
                else_branch: None
            }
        );
        assert!(matches!(
            statement("IF total = 0 { }"),
            Statement::If { condition: BooleanExpression::Comparison { operator: ComparisonOperator::Eq, .. }, .. }
        ));
        assert!(matches!(
            statement(r#"IF "Banner" IS VISIBLE { }"#),
            Statement::If { condition: BooleanExpression::ElementState { negated: false, .. }, .. }
        ));
    }

    #[test]
    fn test_else_if_nests_a_single_if() {
        let node = statement(
            r#"
            IF BUTTON "Next" IS NOT DISABLED { CLICK "Next" }
            ELSE IF retry { LOG "retry" }
            ELSE { FAIL "stuck" }
            "#,
        );
        let Statement::If { condition, else_branch, .. } = node else {
            panic!("expected IF");
        };
        assert!(matches!(condition, BooleanExpression::ElementState { negated: true, state: ElementState::Disabled, .. }));
        let else_branch = else_branch.expect("else branch");
        assert_eq!(else_branch.len(), 1);
        let Statement::If { else_branch: inner_else, .. } = &else_branch[0].node else {
            panic!("expected nested IF");
        };
        assert_eq!(inner_else.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_loops_and_try() {
        let all = statements(
            r#"
            TRY { CLICK "Maybe" } CATCH { LOG "missing" }
            REPEAT 3 TIMES { CLICK "More" }
            FOR EACH user IN users { LOG user }
            "#,
        );
        assert!(all.iter().all(Statement::is_block));
        assert!(matches!(&all[0], Statement::TryCatch { try_block, catch_block } if try_block.len() == 1 && catch_block.len() == 1));
        assert!(matches!(&all[1], Statement::Repeat { count: Expression::NumberLiteral(n), .. } if *n == 3.0));
        assert!(matches!(&all[2], Statement::ForEach { item, .. } if item == "user"));
        assert!(!Statement::Refresh.is_block());
    }

    #[test]
    fn test_statement_spans_track_lines() {
        let program = parse_ok("FEATURE F {\n  SCENARIO \"s\" {\n    CLICK a\n    IF x {\n      LOG \"y\"\n    }\n  }\n}");
        let statements = &program.features[0].scenarios[0].statements;
        assert_eq!(statements[0].line(), 3);
        assert_eq!(statements[1].line(), 4);
        assert!(statements[1].span.end > statements[0].span.end);
    }

    // ========================================================================
    // Data queries
    // ========================================================================

    #[test]
    fn test_rows_query_with_where_order_and_limit() {
        let node = scenario(r#"ROWS users FROM Users WHERE state = "CA" AND active = true ORDER BY name DESC LIMIT 10"#);
        let Statement::Rows { variable, query } = &node.statements[0].node else {
            panic!("expected ROWS");
        };
        assert_eq!(variable, "users");
        assert_eq!(
            query,
            &DataQuery {
                table: TableRef {
                    table_name: "Users".to_string(),
                    project: None
                },
                where_clause: Some(DataCondition::And {
                    left: Box::new(eq("state", string("CA"))),
                    right: Box::new(eq("active", Expression::BooleanLiteral(true))),
                }),
                order_by: vec![OrderByClause {
                    column: "name".to_string(),
                    direction: SortDirection::Desc
                }],
                limit: Some(10),
                offset: None,
            }
        );
        assert_eq!(node.variables, vec!["users"]);
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let query = rows_query("ROWS r FROM T WHERE a = 1 OR b = 2 AND c = 3");
        let one = Expression::NumberLiteral(1.0);
        let two = Expression::NumberLiteral(2.0);
        let three = Expression::NumberLiteral(3.0);
        assert_eq!(
            query.where_clause,
            Some(DataCondition::Or {
                left: Box::new(eq("a", one)),
                right: Box::new(DataCondition::And {
                    left: Box::new(eq("b", two)),
                    right: Box::new(eq("c", three)),
                }),
            })
        );
    }

    #[test]
    fn test_negated_conditions() {
        let query = rows_query(r#"ROWS r FROM Shop.Orders WHERE note IS NOT NULL AND code NOT IN ["a", "b"]"#);
        assert_eq!(query.table.project.as_deref(), Some("Shop"));
        let Some(DataCondition::And { left, right }) = query.where_clause else {
            panic!("expected AND");
        };
        assert_eq!(
            *left,
            DataCondition::Not {
                condition: Box::new(DataCondition::comparison("note", ComparisonOperator::IsNull, ConditionValue::None))
            }
        );
        assert!(matches!(
            *right,
            DataCondition::Not { condition } if matches!(*condition, DataCondition::Comparison { operator: ComparisonOperator::In, .. })
        ));
    }

    #[test]
    fn test_condition_operators_and_grouping() {
        let query = rows_query(
            r#"ROWS r FROM T WHERE NOT (name STARTS WITH "A" OR name ENDS WITH "z") AND tags IS NOT EMPTY AND count >= 2"#,
        );
        let Some(DataCondition::And { left, right }) = query.where_clause else {
            panic!("expected AND");
        };
        assert!(matches!(
            *right,
            DataCondition::Comparison { ref column, operator: ComparisonOperator::GtEq, .. } if column == "count"
        ));
        let DataCondition::And { left: negated, right: empty } = *left else {
            panic!("expected nested AND");
        };
        assert!(matches!(*empty, DataCondition::Comparison { operator: ComparisonOperator::IsNotEmpty, .. }));
        assert!(matches!(*negated, DataCondition::Not { condition } if matches!(*condition, DataCondition::Or { .. })));
    }

    #[test]
    fn test_limit_outside_rows_is_reported_without_dropping_statement() {
        let result = parse_str(r#"FEATURE F { SCENARIO "s" { ROW first FROM Users LIMIT 1 LOG "next" } }"#);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("only allowed on ROWS"));
        let statements = &result.ast.features[0].scenarios[0].statements;
        assert_eq!(statements.len(), 2);
        assert!(matches!(&statements[0].node, Statement::Row { query, .. } if query.limit.is_none()));
    }

    // ========================================================================
    // Utility expressions
    // ========================================================================

    fn set_value(source: &str) -> SetValue {
        match statement(source) {
            Statement::Set { value, .. } => value,
            other => panic!("expected SET, got {other:?}"),
        }
    }

    #[test]
    fn test_then_chains_to_the_right() {
        let value = set_value("SET a = TRIM x THEN TRIM y THEN TRIM z");
        let trim = |name: &str| UtilityExpression::Trim { value: var(name) };
        assert_eq!(
            value,
            SetValue::Utility(UtilityExpression::Chained {
                first: Box::new(trim("x")),
                second: Box::new(UtilityExpression::Chained {
                    first: Box::new(trim("y")),
                    second: Box::new(trim("z")),
                }),
            })
        );
    }

    #[test]
    fn test_utility_forms() {
        assert_eq!(
            set_value("SET due = ADD 3 DAYS TO TODAY"),
            SetValue::Utility(UtilityExpression::AddDate {
                amount: Expression::NumberLiteral(3.0),
                unit: DateUnit::Day,
                date: UtilityArgument::Utility(Box::new(UtilityExpression::Today)),
            })
        );
        assert_eq!(
            set_value(r#"SET label = FORMAT price AS CURRENCY "EUR""#),
            SetValue::Utility(UtilityExpression::Format {
                value: UtilityArgument::Expression(var("price")),
                format: FormatSpec::Currency(Some("EUR".to_string())),
            })
        );
        assert_eq!(
            set_value("SET r = ROUND total UP TO 2 DECIMALS"),
            SetValue::Utility(UtilityExpression::Round {
                value: var("total"),
                mode: RoundMode::Up,
                decimals: Some(Expression::NumberLiteral(2.0)),
            })
        );
        assert!(matches!(
            set_value("SET y = YEAR OF TODAY"),
            SetValue::Utility(UtilityExpression::DatePart { part: DatePart::Year, .. })
        ));
        assert_eq!(
            set_value("SET id = GENERATE UUID"),
            SetValue::Utility(UtilityExpression::Generate {
                pattern: GeneratePattern::Uuid
            })
        );
        assert!(matches!(set_value("SET n = RANDOM NUMBER FROM 1 TO 10"), SetValue::Utility(UtilityExpression::RandomNumber { .. })));
        assert!(matches!(
            set_value("SET u = CONVERT name TO UPPERCASE"),
            SetValue::Utility(UtilityExpression::Convert { target: ConversionTarget::Uppercase, .. })
        ));
        assert!(matches!(set_value("SET n = LENGTH OF name"), SetValue::Utility(UtilityExpression::Length { .. })));
        assert!(matches!(
            set_value(r#"SET p = PAD id TO 6 WITH "0""#),
            SetValue::Utility(UtilityExpression::Pad { .. })
        ));
    }

    #[test]
    fn test_function_names_without_continuation_are_variables() {
        assert_eq!(set_value("SET copy = day"), SetValue::Expression(var("day")));
        assert_eq!(set_value("SET copy = length"), SetValue::Expression(var("length")));
        assert_eq!(set_value(r#"SET greeting = "hi""#), SetValue::Expression(string("hi")));
    }

    // ========================================================================
    // HTTP
    // ========================================================================

    #[test]
    fn test_api_and_mock() {
        let node = scenario(
            r#"
            API POST "/users" WITH BODY payload AND HEADERS auth AS created
            API GET "/users"
            MOCK API GET "/health" WITH STATUS 200 AND BODY "ok"
            MOCK API "/any" WITH STATUS 500
            "#,
        );
        assert_eq!(
            node.statements[0].node,
            Statement::ApiRequest {
                method: HttpMethod::Post,
                url: string("/users"),
                body: Some(var("payload")),
                headers: Some(var("auth")),
                response_variable: Some("created".to_string()),
            }
        );
        assert!(matches!(node.statements[1].node, Statement::ApiRequest { method: HttpMethod::Get, body: None, .. }));
        assert_eq!(
            node.statements[2].node,
            Statement::MockApi {
                method: Some(HttpMethod::Get),
                url: string("/health"),
                status: Some(Expression::NumberLiteral(200.0)),
                body: Some(string("ok")),
                headers: None,
            }
        );
        assert!(matches!(node.statements[3].node, Statement::MockApi { method: None, .. }));
        assert_eq!(node.variables, vec!["created"]);
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    #[test]
    fn test_bad_statement_yields_one_error_and_keeps_siblings() {
        let result = parse_str(
            r#"
FEATURE F {
    SCENARIO "a" {
        CLICK x
        BOGUS y z
        CLICK w
    }
    SCENARIO "b" { LOG "ok" }
}
"#,
        );
        assert_eq!(result.errors.len(), 1, "{:#?}", result.errors);
        assert_eq!(result.errors[0].kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(result.errors[0].line, 5);
        let feature = &result.ast.features[0];
        assert_eq!(feature.scenarios.len(), 2);
        assert_eq!(feature.scenarios[0].statements.len(), 1);
        assert_eq!(feature.scenarios[1].statements.len(), 1);
    }

    #[test]
    fn test_each_bad_scenario_reports_once() {
        let result = parse_str(
            r#"
FEATURE F {
    SCENARIO "a" { WAIT FOR NETWORK BUSY }
    SCENARIO "b" { GO SIDEWAYS }
    SCENARIO "c" { REFRESH }
}
"#,
        );
        assert_eq!(result.errors.len(), 2, "{:#?}", result.errors);
        assert!(result.errors.iter().all(|e| e.kind == ParseErrorKind::MalformedClause));
        assert_eq!(result.ast.features[0].scenarios.len(), 3);
    }

    #[test]
    fn test_page_resumes_after_broken_action() {
        let result = parse_str(r#"PAGE P { broken { CLICK } FIELD c = "C" }"#);
        assert_eq!(result.errors.len(), 1, "{:#?}", result.errors);
        let page = &result.ast.pages[0];
        assert_eq!(page.actions.len(), 1);
        assert_eq!(page.fields.len(), 1);
        assert_eq!(page.fields[0].name, "c");
    }

    #[test]
    fn test_nested_blocks_are_fully_consumed() {
        let program = parse_ok(
            r#"
FEATURE F {
    SCENARIO "s" {
        IF x { CLICK a } ELSE { TRY { CLICK b } CATCH { LOG "c" } }
        LOG "after"
    }
}
FEATURE G { }
"#,
        );
        assert_eq!(program.features.len(), 2);
        assert_eq!(program.features[0].scenarios[0].statements.len(), 2);
    }

    #[test]
    fn test_top_level_garbage_then_declaration() {
        let result = parse_str(r#"these are not declarations FEATURE F { SCENARIO "s" { } }"#);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.ast.features.len(), 1);
        assert_eq!(result.ast.features[0].scenarios.len(), 1);
    }

    #[test]
    fn test_scenario_outside_feature() {
        let result = parse_str(r#"SCENARIO "s" { CLICK x } FEATURE F { }"#);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("inside a FEATURE"));
        assert_eq!(result.ast.features.len(), 1);
    }

    #[test]
    fn test_unterminated_input_keeps_partial_scenario() {
        let result = parse_str(r#"FEATURE F { SCENARIO "s" { CLICK x"#);
        assert!(result.has_errors());
        assert_eq!(result.ast.features[0].scenarios[0].statements.len(), 1);
    }

    #[test]
    fn test_missing_brace_before_next_scenario() {
        let result = parse_str(r#"FEATURE F { SCENARIO "a" { CLICK x SCENARIO "b" { CLICK y } }"#);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.starts_with("Expected '}'"));
        assert_eq!(result.ast.features[0].scenarios.len(), 2);
    }

    #[test]
    fn test_member_error_closes_feature_before_next_declaration() {
        let result = parse_str("FEATURE A { BOGUS }\n@serial FEATURE B { SCENARIO s { LOG \"x\" } }");
        assert_eq!(result.errors.len(), 1, "{:#?}", result.errors);
        assert_eq!(result.errors[0].line, 1);
        let features = &result.ast.features;
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].name, "B");
        assert_eq!(features[1].annotations, vec![Annotation::Serial]);
        assert_eq!(features[1].scenarios.len(), 1);
    }

    #[test]
    fn test_fixture_member_error_keeps_next_feature_annotations() {
        let result = parse_str("FIXTURE f { SCOPE bogus }\n@skip FEATURE B { SCENARIO s { LOG \"x\" } }");
        assert_eq!(result.errors.len(), 1, "{:#?}", result.errors);
        assert_eq!(result.errors[0].kind, ParseErrorKind::MalformedClause);
        assert_eq!(result.ast.fixtures[0].name, "f");
        assert_eq!(result.ast.features[0].annotations, vec![Annotation::Skip]);
        assert_eq!(result.ast.features[0].scenarios[0].statements.len(), 1);
    }

    #[test]
    fn test_error_in_nested_block_resumes_feature() {
        let result = parse_str(
            r#"
FEATURE F {
    SCENARIO "a" {
        IF x { BOGUS }
        LOG "skipped"
    }
    SCENARIO "b" { LOG "ok" }
}
@only FEATURE G { }
"#,
        );
        assert_eq!(result.errors.len(), 1, "{:#?}", result.errors);
        let features = &result.ast.features;
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].scenarios.len(), 2);
        assert_eq!(features[0].scenarios[1].statements.len(), 1);
        assert_eq!(features[1].annotations, vec![Annotation::Only]);
    }

    #[test]
    fn test_error_in_nested_block_before_missing_brace() {
        let result = parse_str(r#"FEATURE F { SCENARIO "a" { IF x { BOGUS } SCENARIO "b" { LOG "ok" } }"#);
        assert_eq!(result.errors.len(), 1, "{:#?}", result.errors);
        let feature = &result.ast.features[0];
        assert_eq!(feature.scenarios.len(), 2);
        assert_eq!(feature.scenarios[1].name, "b");
        assert_eq!(feature.scenarios[1].statements.len(), 1);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = r#"
PAGE P { FIELD a = "A" }
FEATURE F { SCENARIO "s" { CLICK P.a BOGUS VERIFY url CONTAINS "x" } }
"#;
        assert_eq!(parse_str(source), parse_str(source));
    }

    #[test]
    fn test_error_messages() {
        let result = parse_str(r#"PAGE { } FEATURE F { SCENARIO "s" { CLICK } }"#);
        let messages: Vec<_> = result.errors.iter().map(|e| e.message.as_str()).collect();
        insta::assert_snapshot!(messages.join("\n"), @r"
        Expected page name, found '{'
        Expected a target (a string, a selector or a field reference), found '}'
        ");
    }

    // ========================================================================
    // Limits and totality
    // ========================================================================

    #[test]
    fn test_modifier_cap() {
        let modifiers = "FIRST ".repeat(25);
        let source = format!("FEATURE F {{ SCENARIO \"s\" {{ CLICK \"x\" {modifiers} }} }}");
        let tokens = lexer::lex(&source).unwrap();

        let capped = parse(&tokens);
        assert_eq!(capped.errors.len(), 1);
        assert!(capped.errors[0].message.contains("Too many selector modifiers"));

        let relaxed = parse_with_config(&tokens, &ParserConfig::new().with_max_selector_modifiers(30));
        assert!(relaxed.errors.is_empty(), "{:#?}", relaxed.errors);
    }

    #[test]
    fn test_nesting_cap() {
        let depth = 200;
        let body = format!("{}LOG \"deep\"{}", "IF x { ".repeat(depth), " }".repeat(depth));
        let source = format!("FEATURE F {{ SCENARIO \"s\" {{ {body} }} }}");
        let tokens = lexer::lex(&source).unwrap();

        let result = parse(&tokens);
        assert!(result.errors.iter().any(|e| e.message.contains("maximum depth")));
        assert_eq!(result.ast.features.len(), 1);

        let shallow = parse_with_config(&tokens, &ParserConfig::new().with_max_nesting_depth(3));
        assert!(shallow.errors.iter().any(|e| e.message.contains("maximum depth of 3")));
    }

    #[test]
    fn test_empty_and_eof_less_token_streams() {
        let empty = parse(&[]);
        assert!(empty.ast.is_empty());
        assert!(empty.errors.is_empty());

        // Same stream without the trailing `Eof` token.
        let mut tokens = lexer::lex(r#"FEATURE F { SCENARIO "s" { CLICK x } }"#).unwrap();
        tokens.pop();
        let result = parse(&tokens);
        assert!(result.errors.is_empty(), "{:#?}", result.errors);
        assert_eq!(result.ast.features[0].scenarios[0].statements.len(), 1);
    }

    #[test]
    fn test_garbage_tokens_never_panic() {
        let span = Span::default();
        let kinds = [
            TokenKind::Punctuation(PunctuationId::RBrace),
            TokenKind::Keyword(KeywordId::Scenario),
            TokenKind::Punctuation(PunctuationId::LBrace),
            TokenKind::Keyword(KeywordId::Feature),
            TokenKind::Number,
            TokenKind::Keyword(KeywordId::Verify),
            TokenKind::Operator(OperatorId::Assign),
            TokenKind::Keyword(KeywordId::If),
            TokenKind::Keyword(KeywordId::Page),
            TokenKind::Identifier,
            TokenKind::Punctuation(PunctuationId::At),
            TokenKind::Keyword(KeywordId::Rows),
            TokenKind::Keyword(KeywordId::Where),
            TokenKind::Punctuation(PunctuationId::LParen),
        ];
        for window in 1..=kinds.len() {
            for start in 0..kinds.len() {
                let tokens: Vec<Token> = kinds
                    .iter()
                    .cycle()
                    .skip(start)
                    .take(window * 3)
                    .map(|kind| Token::new(*kind, "not-a-number", span))
                    .collect();
                let result = parse(&tokens);
                assert_eq!(result, parse(&tokens));
            }
        }
    }
}

//! Abstract Syntax Tree for Vero
//!
//! The tree is built once per parse and handed to the code generator as an owned value. Every
//! node derives `serde::Serialize` so generators written outside Rust can consume it as JSON.
//!
//! Statements are wrapped in [`Spanned`] so each one carries the line it started on; declaration
//! nodes store their `line` directly.

use serde::Serialize;

pub use vero_core::lang::annotations::Annotation;
pub use vero_core::lang::http::HttpMethod;
pub use vero_core::lang::selectors::SelectorType;
pub use vero_core::lang::states::ElementState;
pub use vero_core::lang::units::{DateUnit, TimeUnit};
pub use vero_core::lang::words::ScrollDirection;

/// Source location: byte offsets plus the 1-based line and column of `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Extend `self` to cover `other`, keeping the position of whichever starts first.
    pub fn merge(self, other: Span) -> Span {
        let (line, column) = if other.start < self.start {
            (other.line, other.column)
        } else {
            (self.line, self.column)
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line,
            column,
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }
}

pub type Ident = String;

/// A block of statements between `{` and `}`.
pub type Block = Vec<Spanned<Statement>>;

// ============================================================================
// Declarations
// ============================================================================

/// Root of the tree: every top-level declaration, in source order per kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub pages: Vec<PageNode>,
    pub page_actions: Vec<PageActionsNode>,
    pub features: Vec<FeatureNode>,
    pub fixtures: Vec<FixtureNode>,
}

impl Program {
    /// Total number of top-level declarations.
    pub fn declaration_count(&self) -> usize {
        self.pages.len() + self.page_actions.len() + self.features.len() + self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declaration_count() == 0
    }
}

/// `PAGE Name [("pattern", ...)] { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageNode {
    pub name: Ident,
    pub url_patterns: Vec<String>,
    pub fields: Vec<FieldNode>,
    pub variables: Vec<VariableNode>,
    pub actions: Vec<ActionDefinitionNode>,
    pub line: usize,
}

/// `FIELD name = <selector>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldNode {
    pub name: Ident,
    pub selector: SelectorNode,
    pub line: usize,
}

/// Declared type of a page variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Text,
    Number,
    Flag,
}

/// `TEXT|NUMBER|FLAG name = <expression>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableNode {
    pub name: Ident,
    pub var_type: VariableType,
    pub value: Expression,
    pub line: usize,
}

/// `name [WITH p1, p2] { ... }` inside a page or page-actions block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDefinitionNode {
    pub name: Ident,
    pub parameters: Vec<Ident>,
    pub statements: Block,
    /// Names bound inside the body (sorted); a hint for code generators.
    pub variables: Vec<Ident>,
    pub line: usize,
}

/// `PAGEACTIONS Name FOR Page { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageActionsNode {
    pub name: Ident,
    pub for_page: Ident,
    pub actions: Vec<ActionDefinitionNode>,
    pub line: usize,
}

/// `FEATURE Name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureNode {
    pub name: Ident,
    pub annotations: Vec<Annotation>,
    pub tags: Vec<Ident>,
    pub fixtures: Vec<FixtureUseNode>,
    pub hooks: Vec<HookNode>,
    pub scenarios: Vec<ScenarioNode>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HookKind {
    BeforeEach,
    BeforeAll,
    AfterEach,
    AfterAll,
}

/// `BEFORE|AFTER EACH|ALL { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookNode {
    pub kind: HookKind,
    pub statements: Block,
    pub line: usize,
}

/// `SCENARIO "Name" { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioNode {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub tags: Vec<Ident>,
    pub statements: Block,
    /// Names bound inside the body (sorted); a hint for code generators.
    pub variables: Vec<Ident>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureScope {
    #[default]
    Test,
    Worker,
}

/// `FIXTURE name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureNode {
    pub name: Ident,
    pub scope: FixtureScope,
    pub auto: bool,
    pub dependencies: Vec<Ident>,
    pub options: Vec<FixtureOptionNode>,
    pub setup: Block,
    pub teardown: Block,
    pub line: usize,
}

/// `OPTION name DEFAULT <expression>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureOptionNode {
    pub name: Ident,
    pub default: Expression,
}

/// `USE FIXTURE name [WITH opt = value, ...]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureUseNode {
    pub name: Ident,
    pub options: Vec<FixtureOptionValue>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureOptionValue {
    pub name: Ident,
    pub value: Expression,
}

// ============================================================================
// Selectors and targets
// ============================================================================

/// A typed element locator plus its refinements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorNode {
    pub selector_type: SelectorType,
    pub value: String,
    /// Accessible name for `ROLE "x" NAME "y"`.
    pub name_param: Option<String>,
    /// Applied left to right, in source order.
    pub modifiers: Vec<SelectorModifier>,
}

impl SelectorNode {
    pub fn new(selector_type: SelectorType, value: impl Into<String>) -> Self {
        Self {
            selector_type,
            value: value.into(),
            name_param: None,
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SelectorModifier {
    First,
    Last,
    Nth(i64),
    WithText(String),
    WithoutText(String),
    Has(Box<SelectorNode>),
    HasNot(Box<SelectorNode>),
}

/// The element a statement acts on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetNode {
    /// A bare string: match by visible text.
    Text(String),
    /// `field` or `Page.field`.
    Field { page: Option<Ident>, field: Ident },
    Selector(SelectorNode),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Expression {
    StringLiteral(String),
    NumberLiteral(f64),
    BooleanLiteral(bool),
    VariableReference { page: Option<Ident>, name: Ident },
    EnvVarReference { name: Ident },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionTarget {
    Uppercase,
    Lowercase,
    Number,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FormatSpec {
    Pattern(String),
    /// Optional ISO currency code.
    Currency(Option<String>),
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePart {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundMode {
    Nearest,
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum GeneratePattern {
    Pattern(String),
    Uuid,
}

/// A date or number argument that may itself be a utility call (`ADD 1 DAY TO TODAY`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UtilityArgument {
    Expression(Expression),
    Utility(Box<UtilityExpression>),
}

/// String, date and number helpers used on the right-hand side of `SET`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UtilityExpression {
    Trim {
        value: Expression,
    },
    Convert {
        value: Expression,
        target: ConversionTarget,
    },
    Extract {
        value: Expression,
        start: Expression,
        end: Expression,
    },
    Replace {
        value: Expression,
        search: Expression,
        replacement: Expression,
    },
    Split {
        value: Expression,
        delimiter: Expression,
    },
    Join {
        value: Expression,
        delimiter: Expression,
    },
    Length {
        value: Expression,
    },
    Pad {
        value: Expression,
        length: Expression,
        character: Expression,
    },
    Today,
    Now,
    AddDate {
        amount: Expression,
        unit: DateUnit,
        date: UtilityArgument,
    },
    SubtractDate {
        amount: Expression,
        unit: DateUnit,
        date: UtilityArgument,
    },
    Format {
        value: UtilityArgument,
        format: FormatSpec,
    },
    DatePart {
        part: DatePart,
        date: UtilityArgument,
    },
    Round {
        value: Expression,
        mode: RoundMode,
        decimals: Option<Expression>,
    },
    Absolute {
        value: Expression,
    },
    Generate {
        pattern: GeneratePattern,
    },
    RandomNumber {
        min: Expression,
        max: Expression,
    },
    /// `first THEN second`, right-associative.
    Chained {
        first: Box<UtilityExpression>,
        second: Box<UtilityExpression>,
    },
}

// ============================================================================
// Conditions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOperator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "IS_EMPTY")]
    IsEmpty,
    #[serde(rename = "IS_NOT_EMPTY")]
    IsNotEmpty,
    #[serde(rename = "IS_NULL")]
    IsNull,
    #[serde(rename = "CONTAINS")]
    Contains,
    #[serde(rename = "STARTS_WITH")]
    StartsWith,
    #[serde(rename = "ENDS_WITH")]
    EndsWith,
    #[serde(rename = "MATCHES")]
    Matches,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ConditionValue {
    None,
    Single(Expression),
    List(Vec<Expression>),
}

/// `WHERE` clause tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataCondition {
    And {
        left: Box<DataCondition>,
        right: Box<DataCondition>,
    },
    Or {
        left: Box<DataCondition>,
        right: Box<DataCondition>,
    },
    Not {
        condition: Box<DataCondition>,
    },
    Comparison {
        column: Ident,
        operator: ComparisonOperator,
        value: ConditionValue,
    },
}

impl DataCondition {
    pub fn comparison(column: impl Into<Ident>, operator: ComparisonOperator, value: ConditionValue) -> Self {
        DataCondition::Comparison {
            column: column.into(),
            operator,
            value,
        }
    }
}

/// `IF` condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BooleanExpression {
    ElementState {
        target: TargetNode,
        negated: bool,
        state: ElementState,
    },
    VariableTruthy {
        name: Ident,
    },
    Comparison {
        left: Expression,
        operator: ComparisonOperator,
        right: Expression,
    },
}

// ============================================================================
// Data queries
// ============================================================================

/// `[Project.]Table`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRef {
    pub table_name: Ident,
    pub project: Option<Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderByClause {
    pub column: Ident,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQuery {
    pub table: TableRef,
    pub where_clause: Option<DataCondition>,
    pub order_by: Vec<OrderByClause>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ============================================================================
// Statements
// ============================================================================

/// `CONTAINS | EQUALS | MATCHES` for URL and title checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMatch {
    Contains,
    Equals,
    Matches,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollTarget {
    Element(TargetNode),
    Direction(ScrollDirection),
}

/// What `GET ... OF <target>` reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ElementProperty {
    Text,
    Value,
    Count,
    Attribute(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentAssertion {
    Contains { value: Expression },
    HasText { value: Expression },
    HasValue { value: Expression },
    HasCount { value: Expression },
    HasClass { value: Expression },
    HasAttribute { name: Expression, value: Option<Expression> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum VariableCheck {
    IsTrue,
    IsFalse,
    Contains(Expression),
    Equals(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ResponseCheck {
    Status(Expression),
    BodyContains(Expression),
}

/// Right-hand side of `SET`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SetValue {
    Expression(Expression),
    Utility(UtilityExpression),
}

/// Every statement form allowed inside a scenario, hook, action or fixture block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    // Navigation and interaction
    Open {
        url: Expression,
    },
    OpenInNewTab {
        url: Expression,
    },
    Click {
        target: TargetNode,
    },
    DoubleClick {
        target: TargetNode,
    },
    RightClick {
        target: TargetNode,
    },
    Fill {
        target: TargetNode,
        value: Expression,
    },
    Check {
        target: TargetNode,
    },
    Uncheck {
        target: TargetNode,
    },
    Select {
        option: Expression,
        target: TargetNode,
    },
    Hover {
        target: TargetNode,
    },
    Clear {
        target: TargetNode,
    },
    Focus {
        target: TargetNode,
    },
    Press {
        key: Expression,
    },
    Scroll {
        to: ScrollTarget,
    },
    Upload {
        files: Vec<Expression>,
        target: TargetNode,
    },
    Drag {
        source: TargetNode,
        destination: TargetNode,
    },
    Refresh,
    GoBack,
    GoForward,
    SwitchTab {
        tab: Expression,
    },
    CloseTab,

    // Waiting
    Wait {
        duration: Expression,
        unit: TimeUnit,
    },
    WaitForNavigation,
    WaitForNetworkIdle,
    WaitForUrl {
        condition: TextMatch,
        value: Expression,
    },
    WaitForElement {
        target: TargetNode,
        state: Option<ElementState>,
    },

    // Output
    TakeScreenshot {
        target: Option<TargetNode>,
        filename: Option<Expression>,
    },
    Log {
        message: Expression,
    },
    Fail {
        message: Expression,
    },

    // Actions and variables
    Perform {
        page: Option<Ident>,
        action: Ident,
        arguments: Vec<Expression>,
    },
    Set {
        name: Ident,
        value: SetValue,
    },
    Get {
        property: ElementProperty,
        target: TargetNode,
        name: Ident,
    },

    // Assertions
    VerifyState {
        target: TargetNode,
        negated: bool,
        state: ElementState,
    },
    VerifyContent {
        target: TargetNode,
        negated: bool,
        assertion: ContentAssertion,
    },
    VerifyUrl {
        condition: TextMatch,
        value: Expression,
    },
    VerifyTitle {
        condition: TextMatch,
        value: Expression,
    },
    VerifyVariable {
        name: Ident,
        check: VariableCheck,
    },
    VerifyResponse {
        check: ResponseCheck,
    },
    VerifyScreenshot {
        target: Option<TargetNode>,
        name: Option<Expression>,
    },

    // Dialogs
    AcceptDialog {
        response: Option<Expression>,
    },
    DismissDialog,

    // Control flow
    If {
        condition: BooleanExpression,
        then_branch: Block,
        /// `ELSE IF` nests a single `If` statement here.
        else_branch: Option<Block>,
    },
    TryCatch {
        try_block: Block,
        catch_block: Block,
    },
    Repeat {
        count: Expression,
        body: Block,
    },
    ForEach {
        item: Ident,
        collection: Expression,
        body: Block,
    },

    // Data
    Row {
        variable: Ident,
        query: DataQuery,
    },
    Rows {
        variable: Ident,
        query: DataQuery,
    },
    Count {
        variable: Ident,
        query: DataQuery,
    },

    // HTTP
    ApiRequest {
        method: HttpMethod,
        url: Expression,
        body: Option<Expression>,
        headers: Option<Expression>,
        response_variable: Option<Ident>,
    },
    MockApi {
        method: Option<HttpMethod>,
        url: Expression,
        status: Option<Expression>,
        body: Option<Expression>,
        headers: Option<Expression>,
    },
}

impl Statement {
    /// Return `true` for statements that own nested blocks.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Statement::If { .. } | Statement::TryCatch { .. } | Statement::Repeat { .. } | Statement::ForEach { .. }
        )
    }
}

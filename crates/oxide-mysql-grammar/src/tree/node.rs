//! Parse tree nodes.

macro_rules! rule_kinds {
    ($($variant:ident => $name:literal,)*) => {
        /// The grammar rule a rule node was built for.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RuleKind {
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl RuleKind {
            /// Returns the grammar name of the rule.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

rule_kinds! {
    Query => "query",
    SimpleStatement => "simpleStatement",

    SelectStatement => "selectStatement",
    WithClause => "withClause",
    CommonTableExpression => "commonTableExpression",
    QueryExpression => "queryExpression",
    QueryExpressionBody => "queryExpressionBody",
    QueryExpressionParens => "queryExpressionParens",
    QuerySpecification => "querySpecification",
    Subquery => "subquery",
    SelectOption => "selectOption",
    SelectItemList => "selectItemList",
    SelectItem => "selectItem",
    SelectAlias => "selectAlias",
    TableWild => "tableWild",
    IntoClause => "intoClause",
    FromClause => "fromClause",
    TableReferenceList => "tableReferenceList",
    TableReference => "tableReference",
    TableFactor => "tableFactor",
    SingleTable => "singleTable",
    DerivedTable => "derivedTable",
    TableReferenceListParens => "tableReferenceListParens",
    JoinedTable => "joinedTable",
    TableRef => "tableRef",
    TableAlias => "tableAlias",
    IndexHint => "indexHint",
    WhereClause => "whereClause",
    GroupByClause => "groupByClause",
    HavingClause => "havingClause",
    OrderClause => "orderClause",
    OrderExpression => "orderExpression",
    LimitClause => "limitClause",
    LimitOptions => "limitOptions",
    LockingClause => "lockingClause",

    InsertStatement => "insertStatement",
    ReplaceStatement => "replaceStatement",
    InsertFromConstructor => "insertFromConstructor",
    Fields => "fields",
    InsertValues => "insertValues",
    ValueList => "valueList",
    Values => "values",
    InsertQueryExpression => "insertQueryExpression",
    InsertUpdateList => "insertUpdateList",
    UpdateList => "updateList",
    UpdateElement => "updateElement",
    UpdateStatement => "updateStatement",
    DeleteStatement => "deleteStatement",

    CreateStatement => "createStatement",
    CreateTable => "createTable",
    TableElementList => "tableElementList",
    ColumnDefinition => "columnDefinition",
    ColumnName => "columnName",
    DataType => "dataType",
    ColumnAttribute => "columnAttribute",
    TableConstraintDef => "tableConstraintDef",
    KeyList => "keyList",
    CreateIndex => "createIndex",
    CreateDatabase => "createDatabase",
    CreateView => "createView",
    CreateRole => "createRole",
    RoleList => "roleList",
    DropStatement => "dropStatement",
    DropTable => "dropTable",
    DropDatabase => "dropDatabase",
    DropIndex => "dropIndex",
    DropView => "dropView",
    DropRole => "dropRole",
    AlterTable => "alterTable",
    AlterListItem => "alterListItem",
    TruncateTable => "truncateTable",
    RenameTable => "renameTable",
    RenamePair => "renamePair",
    TableName => "tableName",
    TableRefList => "tableRefList",
    SchemaName => "schemaName",
    SchemaRef => "schemaRef",
    IfExists => "ifExists",
    IfNotExists => "ifNotExists",

    UseCommand => "useCommand",
    SetStatement => "setStatement",
    OptionValue => "optionValue",
    TransactionStatement => "transactionStatement",
    SavepointStatement => "savepointStatement",
    ShowStatement => "showStatement",
    DescribeStatement => "describeStatement",
    ExplainStatement => "explainStatement",
    OtherStatement => "otherStatement",

    ExprOr => "exprOr",
    ExprXor => "exprXor",
    ExprAnd => "exprAnd",
    ExprNot => "exprNot",
    ExprIs => "exprIs",
    PrimaryExprPredicate => "primaryExprPredicate",
    PrimaryExprIsNull => "primaryExprIsNull",
    PrimaryExprCompare => "primaryExprCompare",
    PrimaryExprAllAny => "primaryExprAllAny",
    CompOp => "compOp",
    Predicate => "predicate",
    PredicateExprIn => "predicateExprIn",
    PredicateExprBetween => "predicateExprBetween",
    PredicateExprLike => "predicateExprLike",
    PredicateExprRegexp => "predicateExprRegexp",
    BitExpr => "bitExpr",
    SimpleExprVariable => "simpleExprVariable",
    SimpleExprColumnRef => "simpleExprColumnRef",
    SimpleExprRuntimeFunction => "simpleExprRuntimeFunction",
    SimpleExprFunction => "simpleExprFunction",
    SimpleExprCollate => "simpleExprCollate",
    SimpleExprLiteral => "simpleExprLiteral",
    SimpleExprParamMarker => "simpleExprParamMarker",
    SimpleExprSum => "simpleExprSum",
    SimpleExprConcat => "simpleExprConcat",
    SimpleExprUnary => "simpleExprUnary",
    SimpleExprNot => "simpleExprNot",
    SimpleExprList => "simpleExprList",
    SimpleExprSubQuery => "simpleExprSubQuery",
    SimpleExprExists => "simpleExprExists",
    SimpleExprCase => "simpleExprCase",
    SimpleExprCast => "simpleExprCast",
    SimpleExprInterval => "simpleExprInterval",
    SimpleExprBinary => "simpleExprBinary",
    SimpleExprDefault => "simpleExprDefault",
    SimpleExprJsonSeparator => "simpleExprJsonSeparator",
    ExprList => "exprList",
    Literal => "literal",
    TextLiteral => "textLiteral",
    NumLiteral => "numLiteral",
    BoolLiteral => "boolLiteral",
    NullLiteral => "nullLiteral",
    TemporalLiteral => "temporalLiteral",
    ColumnRef => "columnRef",
    FunctionCall => "functionCall",
    RuntimeFunctionCall => "runtimeFunctionCall",
    SumExpr => "sumExpr",
    WindowingClause => "windowingClause",
    UdfExprList => "udfExprList",
    UdfExpr => "udfExpr",
    WhenExpression => "whenExpression",
    ThenExpression => "thenExpression",
    ElseExpression => "elseExpression",
    CastType => "castType",
    IntervalUnit => "interval",
    Variable => "variable",
    Identifier => "identifier",
}

/// Index of a node in its [`ParseTree`](super::ParseTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A grammar rule.
    Rule(RuleKind),
    /// A matched token, by index into the full token list.
    Terminal(usize),
    /// A token skipped during error recovery.
    Error(usize),
}

/// A node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<NodeId>,
    pub(crate) start_token: usize,
    pub(crate) stop_token: Option<usize>,
}

impl Node {
    pub(crate) const fn rule(kind: RuleKind, start_token: usize) -> Self {
        Self {
            kind: NodeKind::Rule(kind),
            children: Vec::new(),
            start_token,
            stop_token: None,
        }
    }

    pub(crate) const fn terminal(token: usize, error: bool) -> Self {
        Self {
            kind: if error {
                NodeKind::Error(token)
            } else {
                NodeKind::Terminal(token)
            },
            children: Vec::new(),
            start_token: token,
            stop_token: Some(token),
        }
    }

    /// Returns what the node stands for.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the rule kind for rule nodes.
    #[must_use]
    pub const fn rule_kind(&self) -> Option<RuleKind> {
        match self.kind {
            NodeKind::Rule(kind) => Some(kind),
            NodeKind::Terminal(_) | NodeKind::Error(_) => None,
        }
    }

    /// Returns the child node ids in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Index of the first token the node covers.
    #[must_use]
    pub const fn start_token(&self) -> usize {
        self.start_token
    }

    /// Index of the last token the node covers, `None` for rules that matched nothing.
    #[must_use]
    pub const fn stop_token(&self) -> Option<usize> {
        self.stop_token
    }
}

//! AST node kinds. Token kinds (`SyntaxKind`) occupy the low range of the
//! shared `u16` space; composite nodes start at `FIRST_NODE`.

pub const FIRST_NODE: u16 = 300;

// Names
pub const QUALIFIED_NAME: u16 = FIRST_NODE;
pub const COMPUTED_PROPERTY_NAME: u16 = FIRST_NODE + 1;

// Signature elements
pub const TYPE_PARAMETER: u16 = FIRST_NODE + 2;
pub const PARAMETER: u16 = FIRST_NODE + 3;

// Type members
pub const PROPERTY_SIGNATURE: u16 = FIRST_NODE + 10;
pub const PROPERTY_DECLARATION: u16 = FIRST_NODE + 11;
pub const METHOD_SIGNATURE: u16 = FIRST_NODE + 12;
pub const METHOD_DECLARATION: u16 = FIRST_NODE + 13;
pub const CONSTRUCTOR: u16 = FIRST_NODE + 14;
pub const GET_ACCESSOR: u16 = FIRST_NODE + 15;
pub const SET_ACCESSOR: u16 = FIRST_NODE + 16;
pub const CALL_SIGNATURE: u16 = FIRST_NODE + 17;
pub const CONSTRUCT_SIGNATURE: u16 = FIRST_NODE + 18;
pub const INDEX_SIGNATURE: u16 = FIRST_NODE + 19;

// Types
pub const TYPE_PREDICATE: u16 = FIRST_NODE + 30;
pub const TYPE_REFERENCE: u16 = FIRST_NODE + 31;
pub const FUNCTION_TYPE: u16 = FIRST_NODE + 32;
pub const CONSTRUCTOR_TYPE: u16 = FIRST_NODE + 33;
pub const TYPE_QUERY: u16 = FIRST_NODE + 34;
pub const TYPE_LITERAL: u16 = FIRST_NODE + 35;
pub const ARRAY_TYPE: u16 = FIRST_NODE + 36;
pub const TUPLE_TYPE: u16 = FIRST_NODE + 37;
pub const OPTIONAL_TYPE: u16 = FIRST_NODE + 38;
pub const REST_TYPE: u16 = FIRST_NODE + 39;
pub const UNION_TYPE: u16 = FIRST_NODE + 40;
pub const INTERSECTION_TYPE: u16 = FIRST_NODE + 41;
pub const PARENTHESIZED_TYPE: u16 = FIRST_NODE + 42;
pub const TYPE_OPERATOR: u16 = FIRST_NODE + 43;
pub const INDEXED_ACCESS_TYPE: u16 = FIRST_NODE + 44;
pub const LITERAL_TYPE: u16 = FIRST_NODE + 45;

// Binding patterns
pub const OBJECT_BINDING_PATTERN: u16 = FIRST_NODE + 50;
pub const ARRAY_BINDING_PATTERN: u16 = FIRST_NODE + 51;
pub const BINDING_ELEMENT: u16 = FIRST_NODE + 52;

// Expressions
pub const ARRAY_LITERAL_EXPRESSION: u16 = FIRST_NODE + 60;
pub const OBJECT_LITERAL_EXPRESSION: u16 = FIRST_NODE + 61;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = FIRST_NODE + 62;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = FIRST_NODE + 63;
pub const CALL_EXPRESSION: u16 = FIRST_NODE + 64;
pub const NEW_EXPRESSION: u16 = FIRST_NODE + 65;
pub const PARENTHESIZED_EXPRESSION: u16 = FIRST_NODE + 66;
pub const FUNCTION_EXPRESSION: u16 = FIRST_NODE + 67;
pub const ARROW_FUNCTION: u16 = FIRST_NODE + 68;
pub const DELETE_EXPRESSION: u16 = FIRST_NODE + 69;
pub const TYPE_OF_EXPRESSION: u16 = FIRST_NODE + 70;
pub const VOID_EXPRESSION: u16 = FIRST_NODE + 71;
pub const AWAIT_EXPRESSION: u16 = FIRST_NODE + 72;
pub const PREFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 73;
pub const POSTFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 74;
pub const BINARY_EXPRESSION: u16 = FIRST_NODE + 75;
pub const CONDITIONAL_EXPRESSION: u16 = FIRST_NODE + 76;
pub const TEMPLATE_EXPRESSION: u16 = FIRST_NODE + 77;
pub const YIELD_EXPRESSION: u16 = FIRST_NODE + 78;
pub const SPREAD_ELEMENT: u16 = FIRST_NODE + 79;
pub const CLASS_EXPRESSION: u16 = FIRST_NODE + 80;
pub const OMITTED_EXPRESSION: u16 = FIRST_NODE + 81;
pub const AS_EXPRESSION: u16 = FIRST_NODE + 82;
pub const NON_NULL_EXPRESSION: u16 = FIRST_NODE + 83;
pub const SATISFIES_EXPRESSION: u16 = FIRST_NODE + 84;
pub const TEMPLATE_SPAN: u16 = FIRST_NODE + 85;

// Statements
pub const BLOCK: u16 = FIRST_NODE + 100;
pub const EMPTY_STATEMENT: u16 = FIRST_NODE + 101;
pub const VARIABLE_STATEMENT: u16 = FIRST_NODE + 102;
pub const EXPRESSION_STATEMENT: u16 = FIRST_NODE + 103;
pub const IF_STATEMENT: u16 = FIRST_NODE + 104;
pub const DO_STATEMENT: u16 = FIRST_NODE + 105;
pub const WHILE_STATEMENT: u16 = FIRST_NODE + 106;
pub const FOR_STATEMENT: u16 = FIRST_NODE + 107;
pub const FOR_IN_STATEMENT: u16 = FIRST_NODE + 108;
pub const FOR_OF_STATEMENT: u16 = FIRST_NODE + 109;
pub const CONTINUE_STATEMENT: u16 = FIRST_NODE + 110;
pub const BREAK_STATEMENT: u16 = FIRST_NODE + 111;
pub const RETURN_STATEMENT: u16 = FIRST_NODE + 112;
pub const SWITCH_STATEMENT: u16 = FIRST_NODE + 113;
pub const LABELED_STATEMENT: u16 = FIRST_NODE + 114;
pub const THROW_STATEMENT: u16 = FIRST_NODE + 115;
pub const TRY_STATEMENT: u16 = FIRST_NODE + 116;
pub const DEBUGGER_STATEMENT: u16 = FIRST_NODE + 117;

// Declarations
pub const VARIABLE_DECLARATION: u16 = FIRST_NODE + 130;
pub const VARIABLE_DECLARATION_LIST: u16 = FIRST_NODE + 131;
pub const FUNCTION_DECLARATION: u16 = FIRST_NODE + 132;
pub const CLASS_DECLARATION: u16 = FIRST_NODE + 133;
pub const INTERFACE_DECLARATION: u16 = FIRST_NODE + 134;
pub const TYPE_ALIAS_DECLARATION: u16 = FIRST_NODE + 135;

// Clauses
pub const CASE_CLAUSE: u16 = FIRST_NODE + 150;
pub const DEFAULT_CLAUSE: u16 = FIRST_NODE + 151;
pub const HERITAGE_CLAUSE: u16 = FIRST_NODE + 152;
pub const CATCH_CLAUSE: u16 = FIRST_NODE + 153;
pub const EXPRESSION_WITH_TYPE_ARGUMENTS: u16 = FIRST_NODE + 154;

// Object literal members
pub const PROPERTY_ASSIGNMENT: u16 = FIRST_NODE + 160;
pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = FIRST_NODE + 161;
pub const SPREAD_ASSIGNMENT: u16 = FIRST_NODE + 162;

pub const SOURCE_FILE: u16 = FIRST_NODE + 200;

/// Function-like declarations whose body (if any) the checker analyzes.
#[inline]
pub const fn is_function_like(kind: u16) -> bool {
    matches!(
        kind,
        FUNCTION_DECLARATION
            | FUNCTION_EXPRESSION
            | ARROW_FUNCTION
            | METHOD_DECLARATION
            | CONSTRUCTOR
            | GET_ACCESSOR
            | SET_ACCESSOR
    )
}

/// Signatures without bodies that may still carry `throws`/`rejects` clauses.
#[inline]
pub const fn is_signature_like(kind: u16) -> bool {
    matches!(
        kind,
        METHOD_SIGNATURE | CALL_SIGNATURE | CONSTRUCT_SIGNATURE | FUNCTION_TYPE | CONSTRUCTOR_TYPE
    )
}

/// Human-readable name of a node kind, for debug output.
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        QUALIFIED_NAME => "QualifiedName",
        COMPUTED_PROPERTY_NAME => "ComputedPropertyName",
        TYPE_PARAMETER => "TypeParameter",
        PARAMETER => "Parameter",
        PROPERTY_SIGNATURE => "PropertySignature",
        PROPERTY_DECLARATION => "PropertyDeclaration",
        METHOD_SIGNATURE => "MethodSignature",
        METHOD_DECLARATION => "MethodDeclaration",
        CONSTRUCTOR => "Constructor",
        GET_ACCESSOR => "GetAccessor",
        SET_ACCESSOR => "SetAccessor",
        CALL_SIGNATURE => "CallSignature",
        CONSTRUCT_SIGNATURE => "ConstructSignature",
        INDEX_SIGNATURE => "IndexSignature",
        TYPE_PREDICATE => "TypePredicate",
        TYPE_REFERENCE => "TypeReference",
        FUNCTION_TYPE => "FunctionType",
        CONSTRUCTOR_TYPE => "ConstructorType",
        TYPE_QUERY => "TypeQuery",
        TYPE_LITERAL => "TypeLiteral",
        ARRAY_TYPE => "ArrayType",
        TUPLE_TYPE => "TupleType",
        OPTIONAL_TYPE => "OptionalType",
        REST_TYPE => "RestType",
        UNION_TYPE => "UnionType",
        INTERSECTION_TYPE => "IntersectionType",
        PARENTHESIZED_TYPE => "ParenthesizedType",
        TYPE_OPERATOR => "TypeOperator",
        INDEXED_ACCESS_TYPE => "IndexedAccessType",
        LITERAL_TYPE => "LiteralType",
        OBJECT_BINDING_PATTERN => "ObjectBindingPattern",
        ARRAY_BINDING_PATTERN => "ArrayBindingPattern",
        BINDING_ELEMENT => "BindingElement",
        ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
        OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        CALL_EXPRESSION => "CallExpression",
        NEW_EXPRESSION => "NewExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        FUNCTION_EXPRESSION => "FunctionExpression",
        ARROW_FUNCTION => "ArrowFunction",
        DELETE_EXPRESSION => "DeleteExpression",
        TYPE_OF_EXPRESSION => "TypeOfExpression",
        VOID_EXPRESSION => "VoidExpression",
        AWAIT_EXPRESSION => "AwaitExpression",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        POSTFIX_UNARY_EXPRESSION => "PostfixUnaryExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        CONDITIONAL_EXPRESSION => "ConditionalExpression",
        TEMPLATE_EXPRESSION => "TemplateExpression",
        YIELD_EXPRESSION => "YieldExpression",
        SPREAD_ELEMENT => "SpreadElement",
        CLASS_EXPRESSION => "ClassExpression",
        OMITTED_EXPRESSION => "OmittedExpression",
        AS_EXPRESSION => "AsExpression",
        NON_NULL_EXPRESSION => "NonNullExpression",
        SATISFIES_EXPRESSION => "SatisfiesExpression",
        TEMPLATE_SPAN => "TemplateSpan",
        BLOCK => "Block",
        EMPTY_STATEMENT => "EmptyStatement",
        VARIABLE_STATEMENT => "VariableStatement",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        IF_STATEMENT => "IfStatement",
        DO_STATEMENT => "DoStatement",
        WHILE_STATEMENT => "WhileStatement",
        FOR_STATEMENT => "ForStatement",
        FOR_IN_STATEMENT => "ForInStatement",
        FOR_OF_STATEMENT => "ForOfStatement",
        CONTINUE_STATEMENT => "ContinueStatement",
        BREAK_STATEMENT => "BreakStatement",
        RETURN_STATEMENT => "ReturnStatement",
        SWITCH_STATEMENT => "SwitchStatement",
        LABELED_STATEMENT => "LabeledStatement",
        THROW_STATEMENT => "ThrowStatement",
        TRY_STATEMENT => "TryStatement",
        DEBUGGER_STATEMENT => "DebuggerStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        VARIABLE_DECLARATION_LIST => "VariableDeclarationList",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        CLASS_DECLARATION => "ClassDeclaration",
        INTERFACE_DECLARATION => "InterfaceDeclaration",
        TYPE_ALIAS_DECLARATION => "TypeAliasDeclaration",
        CASE_CLAUSE => "CaseClause",
        DEFAULT_CLAUSE => "DefaultClause",
        HERITAGE_CLAUSE => "HeritageClause",
        CATCH_CLAUSE => "CatchClause",
        EXPRESSION_WITH_TYPE_ARGUMENTS => "ExpressionWithTypeArguments",
        PROPERTY_ASSIGNMENT => "PropertyAssignment",
        SHORTHAND_PROPERTY_ASSIGNMENT => "ShorthandPropertyAssignment",
        SPREAD_ASSIGNMENT => "SpreadAssignment",
        SOURCE_FILE => "SourceFile",
        _ => "Token",
    }
}

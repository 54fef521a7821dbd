//! NodeArena access methods.
//!
//! Every typed accessor checks the node kind before indexing its pool, so a
//! mismatched query returns `None` instead of another node's payload.

use esc_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;

macro_rules! get_methods {
    ($($(#[$meta:meta])* $method:ident => $pool:ident : $data:ty, [$($kind:ident),+ $(,)?];)*) => {
        impl NodeArena {
            $(
                $(#[$meta])*
                #[inline]
                pub fn $method(&self, node: &Node) -> Option<&$data> {
                    if node.has_data() && matches!(node.kind, $($kind)|+) {
                        self.$pool.get(node.data_index as usize)
                    } else {
                        None
                    }
                }
            )*
        }
    };
}

get_methods! {
    get_qualified_name => qualified_names: QualifiedNameData, [QUALIFIED_NAME];
    get_computed_property => computed_properties: ComputedPropertyData, [COMPUTED_PROPERTY_NAME];
    get_type_parameter => type_parameters: TypeParameterData, [TYPE_PARAMETER];
    get_parameter => parameters: ParameterData, [PARAMETER];
    /// Property, method, call and construct signatures.
    get_signature => signatures: SignatureData,
        [PROPERTY_SIGNATURE, METHOD_SIGNATURE, CALL_SIGNATURE, CONSTRUCT_SIGNATURE];
    get_index_signature => index_signatures: IndexSignatureData, [INDEX_SIGNATURE];
    get_property_decl => property_decls: PropertyDeclData, [PROPERTY_DECLARATION];
    get_method_decl => method_decls: MethodDeclData, [METHOD_DECLARATION];
    get_constructor => constructors: ConstructorData, [CONSTRUCTOR];
    get_accessor => accessors: AccessorData, [GET_ACCESSOR, SET_ACCESSOR];
    get_type_ref => type_refs: TypeRefData, [TYPE_REFERENCE];
    get_function_type => function_types: FunctionTypeData, [FUNCTION_TYPE, CONSTRUCTOR_TYPE];
    get_type_query => type_queries: TypeQueryData, [TYPE_QUERY];
    get_type_literal => type_literals: TypeLiteralData, [TYPE_LITERAL];
    get_array_type => array_types: ArrayTypeData, [ARRAY_TYPE];
    get_tuple_type => tuple_types: TupleTypeData, [TUPLE_TYPE];
    get_wrapped_type => wrapped_types: WrappedTypeData, [PARENTHESIZED_TYPE, OPTIONAL_TYPE, REST_TYPE];
    get_composite_type => composite_types: CompositeTypeData, [UNION_TYPE, INTERSECTION_TYPE];
    get_type_operator => type_operators: TypeOperatorData, [TYPE_OPERATOR];
    get_indexed_access_type => indexed_access_types: IndexedAccessTypeData, [INDEXED_ACCESS_TYPE];
    get_literal_type => literal_types: LiteralTypeData, [LITERAL_TYPE];
    get_type_predicate => type_predicates: TypePredicateData, [TYPE_PREDICATE];
    get_binding_pattern => binding_patterns: BindingPatternData,
        [OBJECT_BINDING_PATTERN, ARRAY_BINDING_PATTERN];
    get_binding_element => binding_elements: BindingElementData, [BINDING_ELEMENT];
    /// Array or object literal.
    get_literal_expr => literal_exprs: LiteralExprData,
        [ARRAY_LITERAL_EXPRESSION, OBJECT_LITERAL_EXPRESSION];
    /// Property access or element access.
    get_access_expr => access_exprs: AccessExprData,
        [PROPERTY_ACCESS_EXPRESSION, ELEMENT_ACCESS_EXPRESSION];
    /// Call or `new` expression.
    get_call_expr => call_exprs: CallExprData, [CALL_EXPRESSION, NEW_EXPRESSION];
    get_parenthesized => parenthesized: ParenthesizedData, [PARENTHESIZED_EXPRESSION];
    /// Function declaration, function expression or arrow function.
    get_function => functions: FunctionData,
        [FUNCTION_DECLARATION, FUNCTION_EXPRESSION, ARROW_FUNCTION];
    get_unary_expr => unary_exprs: UnaryExprData,
        [PREFIX_UNARY_EXPRESSION, POSTFIX_UNARY_EXPRESSION];
    /// await/yield/void/typeof/delete/non-null/spread.
    get_unary_expr_ex => unary_exprs_ex: UnaryExprDataEx,
        [AWAIT_EXPRESSION, YIELD_EXPRESSION, VOID_EXPRESSION, TYPE_OF_EXPRESSION,
         DELETE_EXPRESSION, NON_NULL_EXPRESSION, SPREAD_ELEMENT, SPREAD_ASSIGNMENT];
    get_binary_expr => binary_exprs: BinaryExprData, [BINARY_EXPRESSION];
    get_conditional_expr => conditional_exprs: ConditionalExprData, [CONDITIONAL_EXPRESSION];
    get_template_expr => template_exprs: TemplateExprData, [TEMPLATE_EXPRESSION];
    get_template_span => template_spans: TemplateSpanData, [TEMPLATE_SPAN];
    get_type_assertion => type_assertions: TypeAssertionData, [AS_EXPRESSION, SATISFIES_EXPRESSION];
    get_property_assignment => property_assignments: PropertyAssignmentData, [PROPERTY_ASSIGNMENT];
    get_shorthand_property => shorthand_properties: ShorthandPropertyData,
        [SHORTHAND_PROPERTY_ASSIGNMENT];
    get_class => classes: ClassData, [CLASS_DECLARATION, CLASS_EXPRESSION];
    get_interface => interfaces: InterfaceData, [INTERFACE_DECLARATION];
    get_type_alias => type_aliases: TypeAliasData, [TYPE_ALIAS_DECLARATION];
    get_heritage_clause => heritage_clauses: HeritageData, [HERITAGE_CLAUSE];
    get_expr_type_args => expr_with_type_args: ExprWithTypeArgsData, [EXPRESSION_WITH_TYPE_ARGUMENTS];
    /// VariableStatement or VariableDeclarationList.
    get_variable => variables: VariableData, [VARIABLE_STATEMENT, VARIABLE_DECLARATION_LIST];
    get_variable_declaration => variable_declarations: VariableDeclarationData, [VARIABLE_DECLARATION];
    get_block => blocks: BlockData, [BLOCK];
    get_expression_statement => expr_statements: ExprStatementData, [EXPRESSION_STATEMENT];
    get_if_statement => if_statements: IfStatementData, [IF_STATEMENT];
    /// while, for, do-while.
    get_loop => loops: LoopData, [WHILE_STATEMENT, DO_STATEMENT, FOR_STATEMENT];
    get_for_in_of => for_in_of: ForInOfData, [FOR_IN_STATEMENT, FOR_OF_STATEMENT];
    get_jump_data => jump_data: JumpData, [BREAK_STATEMENT, CONTINUE_STATEMENT];
    /// Return or throw statement.
    get_return_statement => return_data: ReturnData, [RETURN_STATEMENT, THROW_STATEMENT];
    get_switch => switch_data: SwitchData, [SWITCH_STATEMENT];
    get_case_clause => case_clauses: CaseClauseData, [CASE_CLAUSE, DEFAULT_CLAUSE];
    get_labeled_statement => labeled_data: LabeledData, [LABELED_STATEMENT];
    get_try => try_data: TryData, [TRY_STATEMENT];
    get_catch_clause => catch_clauses: CatchClauseData, [CATCH_CLAUSE];
    get_source_file => source_files: SourceFileData, [SOURCE_FILE];
}

impl NodeArena {
    /// Get a thin node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable thin node by index
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    /// Parent of a node, or NONE for the source file and unlinked nodes.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Get the kind of a node, if it exists.
    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|n| n.kind)
    }

    /// Get identifier data for a node.
    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data()
            && (node.kind == SyntaxKind::Identifier as u16
                || node.kind == SyntaxKind::PrivateIdentifier as u16)
        {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get literal data (string, numeric, bigint, regex and template pieces).
    #[inline]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        if node.has_data()
            && matches!(SyntaxKind::try_from_u16(node.kind), Some(kind) if kind >= SyntaxKind::NumericLiteral && kind <= SyntaxKind::TemplateTail)
        {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node)
            .map(|data| data.escaped_text.as_str())
    }

    /// Text of a property name: identifier, string/numeric literal, or a
    /// computed name whose expression is a literal.
    pub fn property_name_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        if let Some(ident) = self.get_identifier(node) {
            return Some(&ident.escaped_text);
        }
        if let Some(lit) = self.get_literal(node) {
            return Some(&lit.text);
        }
        if let Some(computed) = self.get_computed_property(node) {
            return self.property_name_text(computed.expression);
        }
        None
    }

    /// Get the source file data of a root node.
    pub fn get_source_file_at(&self, root: NodeIndex) -> Option<&SourceFileData> {
        self.get(root).and_then(|n| self.get_source_file(n))
    }

    /// Check whether a modifier list contains `kind`.
    pub fn has_modifier(&self, modifiers: &Option<NodeList>, kind: SyntaxKind) -> bool {
        modifiers.as_ref().is_some_and(|list| {
            list.nodes
                .iter()
                .any(|&m| self.get(m).is_some_and(|n| n.kind == kind as u16))
        })
    }

    /// Skip parenthesized expressions, `as`/`satisfies` and non-null assertions.
    pub fn skip_outer_expressions(&self, mut index: NodeIndex) -> NodeIndex {
        loop {
            let Some(node) = self.get(index) else {
                return index;
            };
            index = match node.kind {
                PARENTHESIZED_EXPRESSION => match self.get_parenthesized(node) {
                    Some(p) => p.expression,
                    None => return index,
                },
                AS_EXPRESSION | SATISFIES_EXPRESSION => match self.get_type_assertion(node) {
                    Some(a) => a.expression,
                    None => return index,
                },
                NON_NULL_EXPRESSION => match self.get_unary_expr_ex(node) {
                    Some(u) => u.expression,
                    None => return index,
                },
                _ => return index,
            };
        }
    }

    /// Children of a node in source order.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        self.collect_children(index, &mut out);
        out
    }

    /// Push the children of `index` onto `out` in source order.
    pub fn collect_children(&self, index: NodeIndex, out: &mut Vec<NodeIndex>) {
        let Some(node) = self.get(index) else {
            return;
        };

        fn one(out: &mut Vec<NodeIndex>, child: NodeIndex) {
            if child.is_some() {
                out.push(child);
            }
        }
        fn list(out: &mut Vec<NodeIndex>, children: &NodeList) {
            out.extend(children.nodes.iter().copied().filter(|c| c.is_some()));
        }
        fn opt_list(out: &mut Vec<NodeIndex>, children: &Option<NodeList>) {
            if let Some(children) = children {
                list(out, children);
            }
        }

        match node.kind {
            QUALIFIED_NAME => {
                if let Some(d) = self.get_qualified_name(node) {
                    one(out, d.left);
                    one(out, d.right);
                }
            }
            COMPUTED_PROPERTY_NAME => {
                if let Some(d) = self.get_computed_property(node) {
                    one(out, d.expression);
                }
            }
            TYPE_PARAMETER => {
                if let Some(d) = self.get_type_parameter(node) {
                    one(out, d.name);
                    one(out, d.constraint);
                    one(out, d.default);
                }
            }
            PARAMETER => {
                if let Some(d) = self.get_parameter(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    one(out, d.type_annotation);
                    one(out, d.initializer);
                }
            }
            PROPERTY_SIGNATURE | METHOD_SIGNATURE | CALL_SIGNATURE | CONSTRUCT_SIGNATURE => {
                if let Some(d) = self.get_signature(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    opt_list(out, &d.type_parameters);
                    opt_list(out, &d.parameters);
                    one(out, d.type_annotation);
                    one(out, d.throws_clause);
                    one(out, d.rejects_clause);
                }
            }
            INDEX_SIGNATURE => {
                if let Some(d) = self.get_index_signature(node) {
                    opt_list(out, &d.modifiers);
                    list(out, &d.parameters);
                    one(out, d.type_annotation);
                }
            }
            PROPERTY_DECLARATION => {
                if let Some(d) = self.get_property_decl(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    one(out, d.type_annotation);
                    one(out, d.initializer);
                }
            }
            METHOD_DECLARATION => {
                if let Some(d) = self.get_method_decl(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    one(out, d.type_annotation);
                    one(out, d.throws_clause);
                    one(out, d.rejects_clause);
                    one(out, d.body);
                }
            }
            CONSTRUCTOR => {
                if let Some(d) = self.get_constructor(node) {
                    opt_list(out, &d.modifiers);
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    one(out, d.throws_clause);
                    one(out, d.body);
                }
            }
            GET_ACCESSOR | SET_ACCESSOR => {
                if let Some(d) = self.get_accessor(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    list(out, &d.parameters);
                    one(out, d.type_annotation);
                    one(out, d.throws_clause);
                    one(out, d.body);
                }
            }
            TYPE_PREDICATE => {
                if let Some(d) = self.get_type_predicate(node) {
                    one(out, d.parameter_name);
                    one(out, d.type_node);
                }
            }
            TYPE_REFERENCE => {
                if let Some(d) = self.get_type_ref(node) {
                    one(out, d.type_name);
                    opt_list(out, &d.type_arguments);
                }
            }
            FUNCTION_TYPE | CONSTRUCTOR_TYPE => {
                if let Some(d) = self.get_function_type(node) {
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    one(out, d.type_annotation);
                    one(out, d.throws_clause);
                    one(out, d.rejects_clause);
                }
            }
            TYPE_QUERY => {
                if let Some(d) = self.get_type_query(node) {
                    one(out, d.expr_name);
                }
            }
            TYPE_LITERAL => {
                if let Some(d) = self.get_type_literal(node) {
                    list(out, &d.members);
                }
            }
            ARRAY_TYPE => {
                if let Some(d) = self.get_array_type(node) {
                    one(out, d.element_type);
                }
            }
            TUPLE_TYPE => {
                if let Some(d) = self.get_tuple_type(node) {
                    list(out, &d.elements);
                }
            }
            PARENTHESIZED_TYPE | OPTIONAL_TYPE | REST_TYPE => {
                if let Some(d) = self.get_wrapped_type(node) {
                    one(out, d.type_node);
                }
            }
            UNION_TYPE | INTERSECTION_TYPE => {
                if let Some(d) = self.get_composite_type(node) {
                    list(out, &d.types);
                }
            }
            TYPE_OPERATOR => {
                if let Some(d) = self.get_type_operator(node) {
                    one(out, d.type_node);
                }
            }
            INDEXED_ACCESS_TYPE => {
                if let Some(d) = self.get_indexed_access_type(node) {
                    one(out, d.object_type);
                    one(out, d.index_type);
                }
            }
            LITERAL_TYPE => {
                if let Some(d) = self.get_literal_type(node) {
                    one(out, d.literal);
                }
            }
            OBJECT_BINDING_PATTERN | ARRAY_BINDING_PATTERN => {
                if let Some(d) = self.get_binding_pattern(node) {
                    list(out, &d.elements);
                }
            }
            BINDING_ELEMENT => {
                if let Some(d) = self.get_binding_element(node) {
                    one(out, d.property_name);
                    one(out, d.name);
                    one(out, d.initializer);
                }
            }
            ARRAY_LITERAL_EXPRESSION | OBJECT_LITERAL_EXPRESSION => {
                if let Some(d) = self.get_literal_expr(node) {
                    list(out, &d.elements);
                }
            }
            PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => {
                if let Some(d) = self.get_access_expr(node) {
                    one(out, d.expression);
                    one(out, d.name_or_argument);
                }
            }
            CALL_EXPRESSION | NEW_EXPRESSION => {
                if let Some(d) = self.get_call_expr(node) {
                    one(out, d.expression);
                    opt_list(out, &d.type_arguments);
                    opt_list(out, &d.arguments);
                }
            }
            PARENTHESIZED_EXPRESSION => {
                if let Some(d) = self.get_parenthesized(node) {
                    one(out, d.expression);
                }
            }
            FUNCTION_DECLARATION | FUNCTION_EXPRESSION | ARROW_FUNCTION => {
                if let Some(d) = self.get_function(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    opt_list(out, &d.type_parameters);
                    list(out, &d.parameters);
                    one(out, d.type_annotation);
                    one(out, d.throws_clause);
                    one(out, d.rejects_clause);
                    one(out, d.body);
                }
            }
            PREFIX_UNARY_EXPRESSION | POSTFIX_UNARY_EXPRESSION => {
                if let Some(d) = self.get_unary_expr(node) {
                    one(out, d.operand);
                }
            }
            AWAIT_EXPRESSION | YIELD_EXPRESSION | VOID_EXPRESSION | TYPE_OF_EXPRESSION
            | DELETE_EXPRESSION | NON_NULL_EXPRESSION | SPREAD_ELEMENT | SPREAD_ASSIGNMENT => {
                if let Some(d) = self.get_unary_expr_ex(node) {
                    one(out, d.expression);
                }
            }
            BINARY_EXPRESSION => {
                if let Some(d) = self.get_binary_expr(node) {
                    one(out, d.left);
                    one(out, d.right);
                }
            }
            CONDITIONAL_EXPRESSION => {
                if let Some(d) = self.get_conditional_expr(node) {
                    one(out, d.condition);
                    one(out, d.when_true);
                    one(out, d.when_false);
                }
            }
            TEMPLATE_EXPRESSION => {
                if let Some(d) = self.get_template_expr(node) {
                    one(out, d.head);
                    list(out, &d.template_spans);
                }
            }
            TEMPLATE_SPAN => {
                if let Some(d) = self.get_template_span(node) {
                    one(out, d.expression);
                    one(out, d.literal);
                }
            }
            AS_EXPRESSION | SATISFIES_EXPRESSION => {
                if let Some(d) = self.get_type_assertion(node) {
                    one(out, d.expression);
                    one(out, d.type_node);
                }
            }
            PROPERTY_ASSIGNMENT => {
                if let Some(d) = self.get_property_assignment(node) {
                    one(out, d.name);
                    one(out, d.initializer);
                }
            }
            SHORTHAND_PROPERTY_ASSIGNMENT => {
                if let Some(d) = self.get_shorthand_property(node) {
                    one(out, d.name);
                    one(out, d.object_assignment_initializer);
                }
            }
            CLASS_DECLARATION | CLASS_EXPRESSION => {
                if let Some(d) = self.get_class(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    opt_list(out, &d.type_parameters);
                    opt_list(out, &d.heritage_clauses);
                    list(out, &d.members);
                }
            }
            INTERFACE_DECLARATION => {
                if let Some(d) = self.get_interface(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    opt_list(out, &d.type_parameters);
                    opt_list(out, &d.heritage_clauses);
                    list(out, &d.members);
                }
            }
            TYPE_ALIAS_DECLARATION => {
                if let Some(d) = self.get_type_alias(node) {
                    opt_list(out, &d.modifiers);
                    one(out, d.name);
                    opt_list(out, &d.type_parameters);
                    one(out, d.type_node);
                }
            }
            HERITAGE_CLAUSE => {
                if let Some(d) = self.get_heritage_clause(node) {
                    list(out, &d.types);
                }
            }
            EXPRESSION_WITH_TYPE_ARGUMENTS => {
                if let Some(d) = self.get_expr_type_args(node) {
                    one(out, d.expression);
                    opt_list(out, &d.type_arguments);
                }
            }
            VARIABLE_STATEMENT | VARIABLE_DECLARATION_LIST => {
                if let Some(d) = self.get_variable(node) {
                    opt_list(out, &d.modifiers);
                    list(out, &d.declarations);
                }
            }
            VARIABLE_DECLARATION => {
                if let Some(d) = self.get_variable_declaration(node) {
                    one(out, d.name);
                    one(out, d.type_annotation);
                    one(out, d.initializer);
                }
            }
            BLOCK => {
                if let Some(d) = self.get_block(node) {
                    list(out, &d.statements);
                }
            }
            EXPRESSION_STATEMENT => {
                if let Some(d) = self.get_expression_statement(node) {
                    one(out, d.expression);
                }
            }
            IF_STATEMENT => {
                if let Some(d) = self.get_if_statement(node) {
                    one(out, d.expression);
                    one(out, d.then_statement);
                    one(out, d.else_statement);
                }
            }
            DO_STATEMENT => {
                if let Some(d) = self.get_loop(node) {
                    one(out, d.statement);
                    one(out, d.condition);
                }
            }
            WHILE_STATEMENT | FOR_STATEMENT => {
                if let Some(d) = self.get_loop(node) {
                    one(out, d.initializer);
                    one(out, d.condition);
                    one(out, d.incrementor);
                    one(out, d.statement);
                }
            }
            FOR_IN_STATEMENT | FOR_OF_STATEMENT => {
                if let Some(d) = self.get_for_in_of(node) {
                    one(out, d.initializer);
                    one(out, d.expression);
                    one(out, d.statement);
                }
            }
            BREAK_STATEMENT | CONTINUE_STATEMENT => {
                if let Some(d) = self.get_jump_data(node) {
                    one(out, d.label);
                }
            }
            RETURN_STATEMENT | THROW_STATEMENT => {
                if let Some(d) = self.get_return_statement(node) {
                    one(out, d.expression);
                }
            }
            SWITCH_STATEMENT => {
                if let Some(d) = self.get_switch(node) {
                    one(out, d.expression);
                    list(out, &d.clauses);
                }
            }
            CASE_CLAUSE | DEFAULT_CLAUSE => {
                if let Some(d) = self.get_case_clause(node) {
                    one(out, d.expression);
                    list(out, &d.statements);
                }
            }
            LABELED_STATEMENT => {
                if let Some(d) = self.get_labeled_statement(node) {
                    one(out, d.label);
                    one(out, d.statement);
                }
            }
            TRY_STATEMENT => {
                if let Some(d) = self.get_try(node) {
                    one(out, d.try_block);
                    one(out, d.catch_clause);
                    one(out, d.finally_block);
                }
            }
            CATCH_CLAUSE => {
                if let Some(d) = self.get_catch_clause(node) {
                    one(out, d.variable_declaration);
                    one(out, d.block);
                }
            }
            SOURCE_FILE => {
                if let Some(d) = self.get_source_file(node) {
                    list(out, &d.statements);
                    one(out, d.end_of_file_token);
                }
            }
            _ => {}
        }
    }
}

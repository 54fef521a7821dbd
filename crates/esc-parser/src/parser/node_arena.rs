//! NodeArena creation methods (add_* methods).
//!
//! Nodes are created bottom-up while parsing. Parent links are filled in by
//! `link_parents` once the source file node exists.

use esc_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::*;

macro_rules! add_methods {
    ($($method:ident => $pool:ident : $data:ty),* $(,)?) => {
        impl NodeArena {
            $(
                pub fn $method(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                    let data_index = self.$pool.len() as u32;
                    self.$pool.push(data);
                    self.push_node(Node::with_data(kind, pos, end, data_index))
                }
            )*
        }
    };
}

add_methods! {
    add_identifier_data => identifiers: IdentifierData,
    add_literal => literals: LiteralData,
    add_qualified_name => qualified_names: QualifiedNameData,
    add_computed_property => computed_properties: ComputedPropertyData,
    add_type_parameter => type_parameters: TypeParameterData,
    add_parameter => parameters: ParameterData,
    add_signature => signatures: SignatureData,
    add_index_signature => index_signatures: IndexSignatureData,
    add_property_decl => property_decls: PropertyDeclData,
    add_method_decl => method_decls: MethodDeclData,
    add_constructor => constructors: ConstructorData,
    add_accessor => accessors: AccessorData,
    add_type_ref => type_refs: TypeRefData,
    add_function_type => function_types: FunctionTypeData,
    add_type_query => type_queries: TypeQueryData,
    add_type_literal => type_literals: TypeLiteralData,
    add_array_type => array_types: ArrayTypeData,
    add_tuple_type => tuple_types: TupleTypeData,
    add_wrapped_type => wrapped_types: WrappedTypeData,
    add_composite_type => composite_types: CompositeTypeData,
    add_type_operator => type_operators: TypeOperatorData,
    add_indexed_access_type => indexed_access_types: IndexedAccessTypeData,
    add_literal_type => literal_types: LiteralTypeData,
    add_type_predicate => type_predicates: TypePredicateData,
    add_binding_pattern => binding_patterns: BindingPatternData,
    add_binding_element => binding_elements: BindingElementData,
    add_literal_expr => literal_exprs: LiteralExprData,
    add_access_expr => access_exprs: AccessExprData,
    add_call_expr => call_exprs: CallExprData,
    add_parenthesized => parenthesized: ParenthesizedData,
    add_function => functions: FunctionData,
    add_unary_expr => unary_exprs: UnaryExprData,
    add_unary_expr_ex => unary_exprs_ex: UnaryExprDataEx,
    add_binary_expr => binary_exprs: BinaryExprData,
    add_conditional_expr => conditional_exprs: ConditionalExprData,
    add_template_expr => template_exprs: TemplateExprData,
    add_template_span => template_spans: TemplateSpanData,
    add_type_assertion => type_assertions: TypeAssertionData,
    add_property_assignment => property_assignments: PropertyAssignmentData,
    add_shorthand_property => shorthand_properties: ShorthandPropertyData,
    add_class => classes: ClassData,
    add_interface => interfaces: InterfaceData,
    add_type_alias => type_aliases: TypeAliasData,
    add_heritage => heritage_clauses: HeritageData,
    add_expr_with_type_args => expr_with_type_args: ExprWithTypeArgsData,
    add_variable => variables: VariableData,
    add_variable_declaration => variable_declarations: VariableDeclarationData,
    add_block => blocks: BlockData,
    add_expr_statement => expr_statements: ExprStatementData,
    add_if_statement => if_statements: IfStatementData,
    add_loop => loops: LoopData,
    add_for_in_of => for_in_of: ForInOfData,
    add_jump => jump_data: JumpData,
    add_return => return_data: ReturnData,
    add_switch => switch_data: SwitchData,
    add_case_clause => case_clauses: CaseClauseData,
    add_labeled => labeled_data: LabeledData,
    add_try => try_data: TryData,
    add_catch_clause => catch_clauses: CatchClauseData,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    /// Add a token node (no additional data): keyword types, `this`, `null`, modifiers.
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    /// Add an identifier node.
    pub fn add_identifier(&mut self, pos: u32, end: u32, text: impl Into<String>) -> NodeIndex {
        self.add_identifier_data(
            SyntaxKind::Identifier as u16,
            pos,
            end,
            IdentifierData {
                escaped_text: text.into(),
            },
        )
    }

    /// Add a source file node.
    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        use super::syntax_kind_ext::SOURCE_FILE;
        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        self.push_node(Node::with_data(SOURCE_FILE, pos, end, data_index))
    }

    /// Set flag bits on an existing node.
    pub fn add_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    /// Create a node list spanning its children.
    pub fn make_list(&self, nodes: Vec<NodeIndex>, pos: u32, end: u32) -> NodeList {
        NodeList { nodes, pos, end }
    }

    // ============================================================================
    // Parent Mapping
    // ============================================================================

    /// Fill in `ExtendedNodeInfo::parent` for every node reachable from `root`.
    pub fn link_parents(&mut self, root: NodeIndex) {
        let mut stack = vec![root];
        let mut children = Vec::new();
        while let Some(parent) = stack.pop() {
            children.clear();
            self.collect_children(parent, &mut children);
            for &child in &children {
                if let Some(info) = self.get_extended_mut(child) {
                    info.parent = parent;
                }
                stack.push(child);
            }
        }
    }
}

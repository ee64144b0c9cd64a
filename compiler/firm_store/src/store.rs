//! The store trait.

use firm_mode::Mode;

use crate::{
    EntityAttr, EntityRef, GraphAnchor, GraphRef, NodeAttr, NodeRef, OpTag, RawValue,
    TargetConfig, TypeAttr, TypeList, TypeRef, TypeTag,
};

/// Handle-based access to IR memory owned elsewhere.
///
/// Reads take `&self`, writes take `&mut self`; the typed layers are built
/// for a single compilation thread. Passing a handle that the store never
/// issued is store corruption and panics.
///
/// Raw fields carry no meaning for the store. Unwritten fields read as
/// [`RawValue::Absent`] and unwritten lists read as empty.
pub trait IrStore {
    /// Target this store lays types out for.
    fn target(&self) -> &TargetConfig;

    /// The reference mode matching [`IrStore::target`].
    fn pointer_mode(&self) -> Mode;

    // Types

    fn new_type(&mut self, tag: TypeTag) -> TypeRef;
    fn type_tag(&self, ty: TypeRef) -> TypeTag;
    fn type_attr(&self, ty: TypeRef, attr: TypeAttr) -> RawValue;
    fn set_type_attr(&mut self, ty: TypeRef, attr: TypeAttr, value: RawValue);
    fn type_list(&self, ty: TypeRef, list: TypeList) -> &[RawValue];
    fn push_type_list(&mut self, ty: TypeRef, list: TypeList, value: RawValue);
    /// Overwrite entry `index`; panics if the list is shorter.
    fn set_type_list(&mut self, ty: TypeRef, list: TypeList, index: usize, value: RawValue);
    /// Resize a list, filling new entries with `Absent`.
    fn resize_type_list(&mut self, ty: TypeRef, list: TypeList, len: usize);

    // Entities

    fn new_entity(&mut self, name: &str, ty: TypeRef) -> EntityRef;
    fn entity_name(&self, entity: EntityRef) -> &str;
    fn entity_attr(&self, entity: EntityRef, attr: EntityAttr) -> RawValue;
    fn set_entity_attr(&mut self, entity: EntityRef, attr: EntityAttr, value: RawValue);

    // Graphs

    fn new_graph(&mut self, entity: EntityRef) -> GraphRef;
    fn graph_entity(&self, graph: GraphRef) -> EntityRef;
    fn graph_anchor(&self, graph: GraphRef, anchor: GraphAnchor) -> Option<NodeRef>;
    fn set_graph_anchor(&mut self, graph: GraphRef, anchor: GraphAnchor, node: NodeRef);
    /// Every node created in `graph`, in creation order.
    fn graph_nodes(&self, graph: GraphRef) -> &[NodeRef];

    // Nodes

    fn new_node(
        &mut self,
        graph: GraphRef,
        op: OpTag,
        mode: Mode,
        block: Option<NodeRef>,
        inputs: &[NodeRef],
    ) -> NodeRef;
    fn node_op(&self, node: NodeRef) -> OpTag;
    fn node_graph(&self, node: NodeRef) -> GraphRef;
    fn node_mode(&self, node: NodeRef) -> Mode;
    /// Containing block; `None` for blocks themselves.
    fn node_block(&self, node: NodeRef) -> Option<NodeRef>;
    fn set_node_block(&mut self, node: NodeRef, block: NodeRef);
    fn node_inputs(&self, node: NodeRef) -> &[NodeRef];
    /// Overwrite input `pos`; panics if the node has fewer inputs.
    fn set_node_input(&mut self, node: NodeRef, pos: usize, input: NodeRef);
    fn push_node_input(&mut self, node: NodeRef, input: NodeRef);
    fn node_attr(&self, node: NodeRef, attr: NodeAttr) -> RawValue;
    fn set_node_attr(&mut self, node: NodeRef, attr: NodeAttr, value: RawValue);

    /// Input `pos` of `node`, if it has that many.
    fn node_input(&self, node: NodeRef, pos: usize) -> Option<NodeRef> {
        self.node_inputs(node).get(pos).copied()
    }

    fn node_arity(&self, node: NodeRef) -> usize {
        self.node_inputs(node).len()
    }
}

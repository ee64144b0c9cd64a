//! Arena-backed store.

use firm_mode::{Mode, ModeDescriptor, ModeRegistry};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    EntityAttr, EntityRef, GraphAnchor, GraphRef, IrStore, NodeAttr, NodeRef, OpTag, RawValue,
    Session, StoreError, TargetConfig, TypeAttr, TypeList, TypeRef, TypeTag,
};

struct TypeSlot {
    tag: TypeTag,
    attrs: FxHashMap<TypeAttr, RawValue>,
    lists: FxHashMap<TypeList, Vec<RawValue>>,
}

struct EntitySlot {
    name: Box<str>,
    attrs: FxHashMap<EntityAttr, RawValue>,
}

struct GraphSlot {
    entity: EntityRef,
    anchors: [Option<NodeRef>; GraphAnchor::COUNT],
    nodes: Vec<NodeRef>,
}

struct NodeSlot {
    op: OpTag,
    graph: GraphRef,
    mode: Mode,
    block: Option<NodeRef>,
    inputs: SmallVec<[NodeRef; 3]>,
    attrs: FxHashMap<NodeAttr, RawValue>,
}

/// Converts an arena length into the next handle index.
fn next_index(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("{what} arena exhausted"))
}

/// An [`IrStore`] keeping everything in vectors indexed by handle.
pub struct MemoryStore {
    target: TargetConfig,
    pointer_mode: Mode,
    types: Vec<TypeSlot>,
    entities: Vec<EntitySlot>,
    graphs: Vec<GraphSlot>,
    nodes: Vec<NodeSlot>,
    _session: Session,
}

impl MemoryStore {
    /// An empty store for `target`, kept alive by a share of `session`.
    pub fn new(session: &Session, target: TargetConfig) -> Result<Self, StoreError> {
        let desc = ModeDescriptor::reference(target.pointer_bits());
        let registry = ModeRegistry::global();
        let pointer_mode = match registry.find(&desc) {
            Some(mode) => mode,
            None => registry.get_or_create(&format!("P{}", target.pointer_bits()), desc)?,
        };
        tracing::debug!(
            pointer_bits = target.pointer_bits(),
            pointer_mode = %pointer_mode,
            "created memory store"
        );
        Ok(Self {
            target,
            pointer_mode,
            types: Vec::new(),
            entities: Vec::new(),
            graphs: Vec::new(),
            nodes: Vec::new(),
            _session: session.clone(),
        })
    }

    #[track_caller]
    fn ty(&self, ty: TypeRef) -> &TypeSlot {
        self.types
            .get(ty.index())
            .unwrap_or_else(|| panic!("dangling type handle {ty:?}"))
    }

    #[track_caller]
    fn ty_mut(&mut self, ty: TypeRef) -> &mut TypeSlot {
        self.types
            .get_mut(ty.index())
            .unwrap_or_else(|| panic!("dangling type handle {ty:?}"))
    }

    #[track_caller]
    fn entity(&self, entity: EntityRef) -> &EntitySlot {
        self.entities
            .get(entity.index())
            .unwrap_or_else(|| panic!("dangling entity handle {entity:?}"))
    }

    #[track_caller]
    fn entity_mut(&mut self, entity: EntityRef) -> &mut EntitySlot {
        self.entities
            .get_mut(entity.index())
            .unwrap_or_else(|| panic!("dangling entity handle {entity:?}"))
    }

    #[track_caller]
    fn graph(&self, graph: GraphRef) -> &GraphSlot {
        self.graphs
            .get(graph.index())
            .unwrap_or_else(|| panic!("dangling graph handle {graph:?}"))
    }

    #[track_caller]
    fn graph_mut(&mut self, graph: GraphRef) -> &mut GraphSlot {
        self.graphs
            .get_mut(graph.index())
            .unwrap_or_else(|| panic!("dangling graph handle {graph:?}"))
    }

    #[track_caller]
    fn node(&self, node: NodeRef) -> &NodeSlot {
        self.nodes
            .get(node.index())
            .unwrap_or_else(|| panic!("dangling node handle {node:?}"))
    }

    #[track_caller]
    fn node_mut(&mut self, node: NodeRef) -> &mut NodeSlot {
        self.nodes
            .get_mut(node.index())
            .unwrap_or_else(|| panic!("dangling node handle {node:?}"))
    }
}

impl IrStore for MemoryStore {
    fn target(&self) -> &TargetConfig {
        &self.target
    }

    fn pointer_mode(&self) -> Mode {
        self.pointer_mode
    }

    fn new_type(&mut self, tag: TypeTag) -> TypeRef {
        let ty = TypeRef::new(next_index(self.types.len(), "type"));
        self.types.push(TypeSlot {
            tag,
            attrs: FxHashMap::default(),
            lists: FxHashMap::default(),
        });
        tracing::trace!(?ty, %tag, "new type");
        ty
    }

    fn type_tag(&self, ty: TypeRef) -> TypeTag {
        self.ty(ty).tag
    }

    fn type_attr(&self, ty: TypeRef, attr: TypeAttr) -> RawValue {
        self.ty(ty).attrs.get(&attr).copied().unwrap_or_default()
    }

    fn set_type_attr(&mut self, ty: TypeRef, attr: TypeAttr, value: RawValue) {
        let attrs = &mut self.ty_mut(ty).attrs;
        if value.is_absent() {
            attrs.remove(&attr);
        } else {
            attrs.insert(attr, value);
        }
    }

    fn type_list(&self, ty: TypeRef, list: TypeList) -> &[RawValue] {
        self.ty(ty).lists.get(&list).map_or(&[][..], Vec::as_slice)
    }

    fn push_type_list(&mut self, ty: TypeRef, list: TypeList, value: RawValue) {
        self.ty_mut(ty).lists.entry(list).or_default().push(value);
    }

    fn set_type_list(&mut self, ty: TypeRef, list: TypeList, index: usize, value: RawValue) {
        let entries = self.ty_mut(ty).lists.entry(list).or_default();
        let len = entries.len();
        match entries.get_mut(index) {
            Some(slot) => *slot = value,
            None => panic!("{list:?} index {index} out of range for {ty:?} (len {len})"),
        }
    }

    fn resize_type_list(&mut self, ty: TypeRef, list: TypeList, len: usize) {
        self.ty_mut(ty)
            .lists
            .entry(list)
            .or_default()
            .resize(len, RawValue::Absent);
    }

    fn new_entity(&mut self, name: &str, ty: TypeRef) -> EntityRef {
        // Validates the type handle.
        let _ = self.ty(ty);
        let entity = EntityRef::new(next_index(self.entities.len(), "entity"));
        let mut attrs = FxHashMap::default();
        attrs.insert(EntityAttr::Type, RawValue::Type(ty));
        self.entities.push(EntitySlot {
            name: name.into(),
            attrs,
        });
        tracing::trace!(?entity, name, "new entity");
        entity
    }

    fn entity_name(&self, entity: EntityRef) -> &str {
        &self.entity(entity).name
    }

    fn entity_attr(&self, entity: EntityRef, attr: EntityAttr) -> RawValue {
        self.entity(entity)
            .attrs
            .get(&attr)
            .copied()
            .unwrap_or_default()
    }

    fn set_entity_attr(&mut self, entity: EntityRef, attr: EntityAttr, value: RawValue) {
        let attrs = &mut self.entity_mut(entity).attrs;
        if value.is_absent() {
            attrs.remove(&attr);
        } else {
            attrs.insert(attr, value);
        }
    }

    fn new_graph(&mut self, entity: EntityRef) -> GraphRef {
        let _ = self.entity(entity);
        let graph = GraphRef::new(next_index(self.graphs.len(), "graph"));
        self.graphs.push(GraphSlot {
            entity,
            anchors: [None; GraphAnchor::COUNT],
            nodes: Vec::new(),
        });
        self.set_entity_attr(entity, EntityAttr::Graph, RawValue::Graph(graph));
        tracing::debug!(?graph, entity = self.entity_name(entity), "new graph");
        graph
    }

    fn graph_entity(&self, graph: GraphRef) -> EntityRef {
        self.graph(graph).entity
    }

    fn graph_anchor(&self, graph: GraphRef, anchor: GraphAnchor) -> Option<NodeRef> {
        self.graph(graph).anchors[anchor.index()]
    }

    fn set_graph_anchor(&mut self, graph: GraphRef, anchor: GraphAnchor, node: NodeRef) {
        let _ = self.node(node);
        self.graph_mut(graph).anchors[anchor.index()] = Some(node);
    }

    fn graph_nodes(&self, graph: GraphRef) -> &[NodeRef] {
        &self.graph(graph).nodes
    }

    fn new_node(
        &mut self,
        graph: GraphRef,
        op: OpTag,
        mode: Mode,
        block: Option<NodeRef>,
        inputs: &[NodeRef],
    ) -> NodeRef {
        for &input in block.iter().chain(inputs) {
            let _ = self.node(input);
        }
        let node = NodeRef::new(next_index(self.nodes.len(), "node"));
        self.graph_mut(graph).nodes.push(node);
        self.nodes.push(NodeSlot {
            op,
            graph,
            mode,
            block,
            inputs: SmallVec::from_slice(inputs),
            attrs: FxHashMap::default(),
        });
        tracing::trace!(?node, %op, %mode, "new node");
        node
    }

    fn node_op(&self, node: NodeRef) -> OpTag {
        self.node(node).op
    }

    fn node_graph(&self, node: NodeRef) -> GraphRef {
        self.node(node).graph
    }

    fn node_mode(&self, node: NodeRef) -> Mode {
        self.node(node).mode
    }

    fn node_block(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).block
    }

    fn set_node_block(&mut self, node: NodeRef, block: NodeRef) {
        let _ = self.node(block);
        self.node_mut(node).block = Some(block);
    }

    fn node_inputs(&self, node: NodeRef) -> &[NodeRef] {
        &self.node(node).inputs
    }

    fn set_node_input(&mut self, node: NodeRef, pos: usize, input: NodeRef) {
        let _ = self.node(input);
        let inputs = &mut self.node_mut(node).inputs;
        let len = inputs.len();
        match inputs.get_mut(pos) {
            Some(slot) => *slot = input,
            None => panic!("input {pos} out of range for {node:?} (arity {len})"),
        }
    }

    fn push_node_input(&mut self, node: NodeRef, input: NodeRef) {
        let _ = self.node(input);
        self.node_mut(node).inputs.push(input);
    }

    fn node_attr(&self, node: NodeRef, attr: NodeAttr) -> RawValue {
        self.node(node).attrs.get(&attr).copied().unwrap_or_default()
    }

    fn set_node_attr(&mut self, node: NodeRef, attr: NodeAttr, value: RawValue) {
        let attrs = &mut self.node_mut(node).attrs;
        if value.is_absent() {
            attrs.remove(&attr);
        } else {
            attrs.insert(attr, value);
        }
    }
}

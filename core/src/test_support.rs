//! Host and entity doubles shared by unit tests

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::classify::IconAssignment;
use crate::entity::{
    Capability, CapabilityView, Entity, EntityError, EntityId, EntitySnapshot, EntityType,
    LeagueType, LocalPlayer,
};
use crate::host::IconHost;

pub struct RecordingHost<E = EntitySnapshot> {
    local_player: Mutex<Option<LocalPlayer>>,
    attached: Mutex<Vec<(EntityId, IconAssignment)>>,
    entity: PhantomData<fn() -> E>,
}

impl<E> Default for RecordingHost<E> {
    fn default() -> Self {
        Self {
            local_player: Mutex::new(None),
            attached: Mutex::new(Vec::new()),
            entity: PhantomData,
        }
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local_player(player: LocalPlayer) -> Self {
        Self {
            local_player: Mutex::new(Some(player)),
            ..Self::default()
        }
    }
}

impl<E> RecordingHost<E> {
    pub fn attached(&self) -> Vec<(EntityId, IconAssignment)> {
        self.attached.lock().clone()
    }
}

impl<E: Entity + Send + Sync + 'static> IconHost for RecordingHost<E> {
    type Entity = E;

    fn local_player(&self) -> Option<LocalPlayer> {
        self.local_player.lock().clone()
    }

    fn attach_icon(&self, entity: &E, assignment: &IconAssignment) {
        self.attached.lock().push((entity.id(), *assignment));
    }
}

type LookupHook = Arc<dyn Fn() + Send + Sync>;

/// Snapshot whose capability lookups can fail or run a callback first
pub struct ScriptedEntity {
    snapshot: EntitySnapshot,
    fail_lookups: bool,
    on_lookup: Option<LookupHook>,
}

impl ScriptedEntity {
    pub fn new(snapshot: EntitySnapshot) -> Self {
        Self {
            snapshot,
            fail_lookups: false,
            on_lookup: None,
        }
    }

    /// Every capability lookup errors, like a handle recycled mid-drain
    pub fn failing(snapshot: EntitySnapshot) -> Self {
        Self {
            fail_lookups: true,
            ..Self::new(snapshot)
        }
    }

    pub fn on_lookup(snapshot: EntitySnapshot, hook: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            on_lookup: Some(Arc::new(hook)),
            ..Self::new(snapshot)
        }
    }
}

impl Entity for ScriptedEntity {
    fn id(&self) -> EntityId {
        self.snapshot.id()
    }

    fn entity_type(&self) -> EntityType {
        self.snapshot.entity_type()
    }

    fn league(&self) -> LeagueType {
        self.snapshot.league()
    }

    fn path(&self) -> &str {
        self.snapshot.path()
    }

    fn render_name(&self) -> &str {
        self.snapshot.render_name()
    }

    fn is_valid(&self) -> bool {
        self.snapshot.is_valid()
    }

    fn is_alive(&self) -> bool {
        self.snapshot.is_alive()
    }

    fn is_opened(&self) -> bool {
        self.snapshot.is_opened()
    }

    fn capability(&self, capability: &Capability) -> Result<Option<CapabilityView>, EntityError> {
        if let Some(hook) = &self.on_lookup {
            hook();
        }
        if self.fail_lookups {
            return Err(EntityError::CapabilityLookup {
                id: self.id(),
                capability: capability.to_string(),
                reason: "component table moved".to_string(),
            });
        }
        self.snapshot.capability(capability)
    }
}

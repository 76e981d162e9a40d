//! Hoversync Replica - Ownership-gated optimistic replication
//!
//! This crate manages the networked state of one shared object instance:
//!
//! - **Directory traits**: the replication substrate as an injected
//!   capability (record lookup/creation, ownership arbitration, event
//!   delivery), never ambient global state
//! - **Ownership gate**: optimistic, non-blocking acquisition with an
//!   explicit per-record state machine; only authoritative substrate events
//!   mark a gate superseded
//! - **Replicated store**: canonical fields gated by readiness, ownership,
//!   and the synchronization manifest; remote values override local belief
//! - **Entity resolver**: pure key derivation plus create-or-join attachment
//! - **Session bootstrap**: one-shot initialization deferred until connected
//! - **Memory substrate**: a deterministic in-process directory for tests
//!   and single-process sessions
//!
//! The design trades consistency for latency deliberately: mutations apply
//! locally the moment ownership is optimistically confirmed, and a losing
//! writer's state silently reconverges once the substrate's resolution
//! arrives. The worst outcome anywhere in this crate is a dropped local
//! intent; there is no fatal path.

mod directory;
mod error;
mod memory;
mod ownership;
mod resolver;
mod session;
mod store;

pub use directory::{RecordDirectory, RecordEvent, RecordHandle};
pub use error::{Error, Result};
pub use memory::MemoryDirectory;
pub use ownership::{OwnerState, OwnershipGate};
pub use resolver::{Binding, EntityResolver, LocalObject};
pub use session::{Session, SessionBootstrap};
pub use store::{ReplicatedStore, StateChange, StateSnapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hoversync_core::{
        ParticipantId, RecordTemplate, ShapeCatalog, SyncManifest,
    };

    /// One simulated participant: resolver, binding, and store.
    struct Participant {
        resolver: EntityResolver,
        binding: Binding,
        store: ReplicatedStore,
    }

    impl Participant {
        fn join(directory: &mut MemoryDirectory, id: u64, object_name: &str) -> Self {
            let participant = ParticipantId::new(id);
            let resolver = EntityResolver::new(participant);
            let key = resolver.resolve_key(directory, &LocalObject::new(object_name));
            let binding = resolver
                .attach(directory, &key, &RecordTemplate::hover_object())
                .unwrap();
            let mut store = ReplicatedStore::new(
                binding.handle,
                ShapeCatalog::default(),
                SyncManifest::hover_object(0.01),
                OwnershipGate::new(participant),
            );
            store.pump(directory);
            Self {
                resolver,
                binding,
                store,
            }
        }

        fn leave(self, directory: &mut MemoryDirectory) {
            self.resolver.release(directory, self.binding);
        }
    }

    #[test]
    fn test_late_joiner_sees_existing_state() {
        // Participant A creates "abc-hover" and scales the object; B resolves
        // the same key later and must read A's value, not the default.
        let mut directory = MemoryDirectory::new();
        directory.set_ancestor("orb", "abc");

        let mut a = Participant::join(&mut directory, 1, "orb");
        a.store.set_scale(&mut directory, Vec3::splat(1.3));

        let b = Participant::join(&mut directory, 2, "orb");
        assert!(b.binding.handle == a.binding.handle);
        assert!(b.store.is_ready());
        assert_eq!(b.store.snapshot().scale, Vec3::splat(1.3));
        assert_ne!(b.store.snapshot().scale, Vec3::ONE);
    }

    #[test]
    fn test_full_session_converges_and_tears_down() {
        let mut directory = MemoryDirectory::new();

        let mut a = Participant::join(&mut directory, 1, "orb");
        let mut b = Participant::join(&mut directory, 2, "orb");

        a.store.advance_shape(&mut directory);
        a.store.set_scale(&mut directory, Vec3::splat(1.4));
        b.store.pump(&mut directory);

        // B takes over and mutates; A converges to B's values.
        b.store.advance_shape(&mut directory);
        a.store.pump(&mut directory);

        let snap_a = a.store.snapshot();
        let snap_b = b.store.snapshot();
        assert_eq!(snap_a.shape_index, 1);
        assert_eq!(snap_a.shape_index, snap_b.shape_index);
        assert_eq!(snap_a.scale, snap_b.scale);

        // Lifetime is scoped to "at least one participant present".
        a.leave(&mut directory);
        assert_eq!(directory.record_count(), 1);
        b.leave(&mut directory);
        assert_eq!(directory.record_count(), 0);
    }

    #[test]
    fn test_concurrent_acquirers_resolve_to_one_owner() {
        let mut directory = MemoryDirectory::new();
        let mut a = Participant::join(&mut directory, 1, "orb");
        let mut b = Participant::join(&mut directory, 2, "orb");

        // Both mutate "concurrently" on a never-owned record: both gates
        // optimistically believe ownership for a window.
        a.store.set_scale(&mut directory, Vec3::splat(1.2));
        b.store.set_scale(&mut directory, Vec3::splat(1.8));
        assert!(a.store.gate().is_owner());
        assert!(b.store.gate().is_owner());

        // The substrate recorded exactly one owner; once notifications land,
        // exactly one local belief survives and both snapshots agree.
        a.store.pump(&mut directory);
        b.store.pump(&mut directory);
        let owners = [a.store.gate().is_owner(), b.store.gate().is_owner()];
        assert_eq!(owners.iter().filter(|o| **o).count(), 1);
        assert_eq!(a.store.snapshot().scale, b.store.snapshot().scale);
        assert_eq!(a.store.snapshot().scale, Vec3::splat(1.8));
    }

    #[test]
    fn test_bootstrap_gates_resolution() {
        struct Transport {
            connected: bool,
        }
        impl Session for Transport {
            fn is_connected(&self) -> bool {
                self.connected
            }
        }

        let mut directory = MemoryDirectory::new();
        let mut transport = Transport { connected: false };
        let mut bootstrap = SessionBootstrap::new();
        let mut participant = None;

        // Frame loop: resolution waits for the connection event.
        for frame in 0..4 {
            if frame == 2 {
                transport.connected = true;
            }
            if bootstrap.poll(&transport) {
                participant = Some(Participant::join(&mut directory, 1, "orb"));
            }
        }

        assert!(participant.is_some());
        assert_eq!(directory.record_count(), 1);
    }
}

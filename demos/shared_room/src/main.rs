//! Shared Room Example
//!
//! Two simulated participants share one hover object through the in-memory
//! substrate:
//! - A connects, resolves the record key, and creates the shared record
//! - A drags the object larger; jitter-level deltas stay off the wire
//! - B joins late, attaches to the same record, and catches up on A's state
//! - B clicks through shapes; both visuals converge
//! - Both leave; the non-durable record is discarded

use glam::Vec3;
use hoversync_core::{ParticipantId, RecordTemplate, ShapeCatalog, ShapeKind, SyncManifest};
use hoversync_replica::{
    Binding, EntityResolver, LocalObject, MemoryDirectory, OwnershipGate, ReplicatedStore,
    Session, SessionBootstrap,
};
use hoversync_stage::{PresentationController, StageConfig, Visual};

const SCALE_EPSILON: f32 = 0.01;
const FRAME_SECS: f32 = 1.0 / 60.0;

/// The session transport, reduced to its readiness signal
struct RoomSession {
    connected: bool,
}

impl Session for RoomSession {
    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Prints every replicated change the controller applies
struct ConsoleVisual {
    label: &'static str,
}

impl ConsoleVisual {
    fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Visual for ConsoleVisual {
    fn set_shape(&mut self, kind: ShapeKind) {
        println!("  [{}] shape -> {}", self.label, kind);
    }

    fn set_scale(&mut self, scale: Vec3) {
        println!("  [{}] scale -> {:.2}", self.label, scale.x);
    }

    fn set_rotation(&mut self, rotation: Vec3) {
        println!("  [{}] rotation -> {:?}", self.label, rotation);
    }

    fn set_height_offset(&mut self, _offset: f32) {
        // The idle bob moves every frame; not worth printing on a console.
    }
}

/// One participant: resolver, binding, store, controller, visual
struct Participant {
    resolver: EntityResolver,
    binding: Binding,
    store: ReplicatedStore,
    controller: PresentationController,
    visual: ConsoleVisual,
}

impl Participant {
    fn join(
        directory: &mut MemoryDirectory,
        id: u64,
        label: &'static str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let participant = ParticipantId::new(id);
        let resolver = EntityResolver::new(participant);
        let key = resolver.resolve_key(directory, &LocalObject::new("pedestal-orb"));
        let binding = resolver.attach(directory, &key, &RecordTemplate::hover_object())?;
        println!(
            "  [{}] {} record \"{}\"",
            label,
            if binding.created { "created" } else { "joined" },
            key
        );
        let store = ReplicatedStore::new(
            binding.handle,
            ShapeCatalog::default(),
            SyncManifest::hover_object(SCALE_EPSILON),
            OwnershipGate::new(participant),
        );
        let controller =
            PresentationController::new(StageConfig::default(), ShapeCatalog::default());
        Ok(Self {
            resolver,
            binding,
            store,
            controller,
            visual: ConsoleVisual::new(label),
        })
    }

    fn frame(&mut self, time_secs: f32, directory: &mut MemoryDirectory) {
        self.controller
            .frame(time_secs, directory, &mut self.store, &mut self.visual);
    }

    fn leave(self, directory: &mut MemoryDirectory) {
        self.resolver.release(directory, self.binding);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Hoversync Shared Room Example ===\n");

    let mut directory = MemoryDirectory::new();
    // The orb sits under a replicated pedestal, so both participants derive
    // the record key from the pedestal's identifier.
    directory.set_ancestor("pedestal-orb", "room-pedestal");

    // Participant A connects; resolution waits for the connection event.
    println!("Participant A connecting...");
    let mut session_a = RoomSession { connected: false };
    let mut bootstrap_a = SessionBootstrap::new();
    let mut a = None;
    let mut time = 0.0f32;
    for frame in 0..3 {
        if frame == 2 {
            session_a.connected = true;
        }
        if bootstrap_a.poll(&session_a) {
            a = Some(Participant::join(&mut directory, 1, "A")?);
        }
        if let Some(a) = a.as_mut() {
            a.frame(time, &mut directory);
        }
        time += FRAME_SECS;
    }
    let mut a = a.expect("session connected during the loop");

    // A drags the orb larger. The fine-grained deltas land locally every
    // frame but only meaningful changes reach the wire.
    println!("\nParticipant A drags the orb larger...");
    a.controller.begin_drag(&a.store);
    for _ in 0..30 {
        a.controller.drag(2.0, &mut directory, &mut a.store);
        a.frame(time, &mut directory);
        time += FRAME_SECS;
    }
    println!("  [A] local scale is now {:.2}", a.store.snapshot().scale.x);

    // B joins late and catches up on the existing state.
    println!("\nParticipant B joins the room...");
    let mut b = Participant::join(&mut directory, 2, "B")?;
    b.frame(time, &mut directory);

    // B clicks through a few shapes; ownership moves to B and A follows.
    println!("\nParticipant B clicks through shapes...");
    for _ in 0..3 {
        b.controller.activate(&mut directory, &mut b.store);
        time += FRAME_SECS;
        a.frame(time, &mut directory);
        b.frame(time, &mut directory);
    }

    let snap_a = a.store.snapshot();
    let snap_b = b.store.snapshot();
    println!("\nConverged state:");
    println!(
        "  [A] shape index {}, scale {:.2}",
        snap_a.shape_index, snap_a.scale.x
    );
    println!(
        "  [B] shape index {}, scale {:.2}",
        snap_b.shape_index, snap_b.scale.x
    );

    // Teardown: the record lives exactly as long as someone is attached.
    println!("\nParticipants leave the room...");
    a.leave(&mut directory);
    println!("  records after A leaves: {}", directory.record_count());
    b.leave(&mut directory);
    println!("  records after B leaves: {}", directory.record_count());

    println!("\n=== Session Complete ===");
    Ok(())
}

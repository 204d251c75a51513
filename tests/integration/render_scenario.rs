//! Render scenario integration tests
//!
//! A mesh must always be paired with a transform. Walks one entity through
//! the full lifecycle: valid run, broken precondition, refusal, cleanup.

use aether::{
    ComponentCollection, ComponentSystem, EcsConfig, Entity, EntityAllocator, ErrorKind,
    SharedCollection, SystemLogic,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Vec3(f32, f32, f32);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    position: Vec3,
    rotation: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Mesh {
    entity: Entity,
    mesh: u32,
}

/// Records the transform seen for each mesh.
#[derive(Default)]
struct Render {
    drawn: Vec<(Entity, u32, Transform)>,
}

impl SystemLogic for Render {
    fn is_valid(&self, collection: &ComponentCollection, entity: Entity) -> bool {
        !collection.has::<Mesh>(entity) || collection.has::<Transform>(entity)
    }

    fn run(&mut self, collection: &ComponentCollection) {
        self.drawn.clear();
        let Some(meshes) = collection.try_pool::<Mesh>() else {
            return;
        };
        for mesh in meshes.get_all() {
            if let Some(&transform) = collection.get::<Transform>(mesh.entity) {
                self.drawn.push((mesh.entity, mesh.mesh, transform));
            }
        }
    }
}

fn transform() -> Transform {
    Transform {
        position: Vec3(1.0, 2.0, 3.0),
        rotation: Vec3(4.0, 5.0, 6.0),
    }
}

fn scene() -> (SharedCollection, Entity) {
    let alloc = EntityAllocator::new();
    let e1 = alloc.allocate();
    let collection = ComponentCollection::shared_with_config(EcsConfig::checked());
    {
        let mut c = collection.borrow_mut();
        c.add(e1, Mesh { entity: e1, mesh: 7 }).unwrap();
        c.add(e1, transform()).unwrap();
    }
    (collection, e1)
}

// =============================================================================
// Full Lifecycle
// =============================================================================

#[test]
fn render_lifecycle() {
    let (collection, e1) = scene();
    let mut render =
        ComponentSystem::new_validated("Render", collection.clone(), Render::default());

    // Valid: the run observes E1's transform
    assert!(render.is_valid());
    render.run().unwrap();
    assert_eq!(render.logic().drawn, [(e1, 7, transform())]);

    // Broken: mesh without transform
    let removed = collection.borrow_mut().remove::<Transform>(e1);
    assert_eq!(removed, Some(transform()));
    assert!(!render.is_valid());

    let err = render.run().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidSystemRun { .. }));
    assert!(err.to_string().contains("Render"));
    assert!(err.to_string().contains(&e1.to_string()));

    // Cleanup: E1 is gone everywhere and the system recovers
    collection.borrow_mut().remove_all(e1);
    {
        let c = collection.borrow();
        assert!(!c.contains(e1));
        assert!(!c.has::<Mesh>(e1));
        assert!(!c.has::<Transform>(e1));
        assert!(c.entities().is_empty());
    }
    assert!(render.is_valid());
    render.run().unwrap();
    assert!(render.logic().drawn.is_empty());

    drop(render);
    assert_eq!(collection.borrow().system_count(), 0);
}

#[test]
fn restoring_the_transform_restores_the_system() {
    let (collection, e1) = scene();
    let mut render =
        ComponentSystem::new_validated("Render", collection.clone(), Render::default());

    collection.borrow_mut().remove::<Transform>(e1);
    assert!(render.run().is_err());

    collection.borrow_mut().add(e1, transform()).unwrap();
    assert!(render.run().is_ok());
    assert_eq!(render.logic().drawn.len(), 1);
}

#[test]
fn render_ignores_bare_transforms() {
    let (collection, e1) = scene();
    let e2 = Entity::from_raw(e1.raw() + 1);
    collection.borrow_mut().add(e2, transform()).unwrap();

    let mut render = ComponentSystem::new_validated("Render", collection, Render::default());
    render.run().unwrap();

    assert_eq!(render.logic().drawn.len(), 1);
    assert_eq!(render.logic().drawn[0].0, e1);
}

#[test]
fn duplicate_mesh_is_rejected() {
    let (collection, e1) = scene();
    let err = collection
        .borrow_mut()
        .add(e1, Mesh { entity: e1, mesh: 8 })
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::DuplicateComponent { .. }));
    assert_eq!(collection.borrow().get::<Mesh>(e1).map(|m| m.mesh), Some(7));
}

#[test]
fn unchecked_render_runs_regardless() {
    let collection = ComponentCollection::shared_with_config(EcsConfig::unchecked());
    let e1 = Entity::from_raw(1);
    collection
        .borrow_mut()
        .add(e1, Mesh { entity: e1, mesh: 7 })
        .unwrap();

    let mut render = ComponentSystem::new("Render", collection, Render::default());
    render.run().unwrap();
    assert!(render.logic().drawn.is_empty());
}

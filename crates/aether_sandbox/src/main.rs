//! Aether sandbox: a small walk through the ECS.
//!
//! Builds a collection with one renderable entity, runs a render system over
//! it, breaks the render system's precondition, and shows the refused run.
//!
//! Set `RUST_LOG=trace` to also see the storage layer's diagnostics.

use std::process::ExitCode;

use aether_foundation::{Entity, ErrorKind, new_entity};
use aether_storage::{ComponentCollection, ComponentSystem, SystemLogic};

/// Simple utility vector for the example.
#[derive(Clone, Copy, Debug)]
struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

/// Components are plain data.
#[derive(Clone, Copy, Debug)]
struct Transform {
    position: Vec3,
    rotation: Vec3,
}

/// Any number of component types can be defined. This one remembers its
/// owner so the render loop can look up the matching transform.
#[derive(Clone, Copy, Debug)]
struct Mesh {
    entity: Entity,
    mesh: u32,
}

/// Draws every mesh at its entity's transform.
#[derive(Default)]
struct Render {
    drawn: usize,
}

impl SystemLogic for Render {
    fn is_valid(&self, collection: &ComponentCollection, entity: Entity) -> bool {
        log::trace!("validating entity {entity} for render system");

        // Entities with a mesh must also have a transform
        if collection.has::<Mesh>(entity) && !collection.has::<Transform>(entity) {
            log::warn!("validation failed: entity {entity} has a Mesh but no Transform");
            return false;
        }
        true
    }

    fn run(&mut self, collection: &ComponentCollection) {
        log::info!("running render system...");

        let Some(meshes) = collection.try_pool::<Mesh>() else {
            return;
        };

        for mesh in meshes.get_all() {
            let Some(transform) = collection.get::<Transform>(mesh.entity) else {
                continue;
            };
            let (p, r) = (transform.position, transform.rotation);
            log::trace!(
                "entity {}: position=[{}, {}, {}], rotation=[{}, {}, {}], mesh={}",
                mesh.entity,
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                r.z,
                mesh.mesh
            );
            self.drawn += 1;
        }

        log::info!("render system done");
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,aether_sandbox=trace"),
    )
    .init();

    match demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("fatal error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn demo() -> Result<(), Box<dyn std::error::Error>> {
    log::info!("ECS demo started");

    let entity = new_entity();
    log::trace!("created entity with id {entity}");

    let transform = Transform {
        position: Vec3 {
            x: 1.0,
            y: 2.0,
            z: 3.0,
        },
        rotation: Vec3 {
            x: 4.0,
            y: 5.0,
            z: 6.0,
        },
    };
    let mesh = Mesh { entity, mesh: 7 };

    // Components go into the collection first
    let collection = ComponentCollection::shared();
    {
        let mut components = collection.borrow_mut();
        components.add(entity, transform)?;
        components.add(entity, mesh)?;
    }
    log::trace!("added Transform and Mesh to entity {entity}");

    // Then systems are built on top of it
    let mut render =
        ComponentSystem::new_validated("Render", collection.clone(), Render::default());

    render.run()?;
    log::info!("drew {} mesh(es)", render.logic().drawn);

    log::trace!("removing Transform from entity {entity}...");
    collection.borrow_mut().remove::<Transform>(entity);

    // The entity now has a mesh without a transform
    match render.run() {
        Ok(()) if !collection.borrow().config().is_checked() => {
            log::warn!("unchecked build: render ran without validation");
        }
        Ok(()) => return Err("render system ran on an invalid collection".into()),
        Err(e) if matches!(e.kind, ErrorKind::InvalidSystemRun { .. }) => {
            log::error!("{e}");
        }
        Err(e) => return Err(e.into()),
    }

    log::trace!("cleaning up entity {entity}...");
    collection.borrow_mut().remove_all(entity);
    drop(render);
    drop(collection);

    log::info!("ECS demo finished");
    Ok(())
}

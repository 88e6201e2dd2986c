use std::collections::HashSet;

use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResized};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Arena, BodyColor, BodyId, NVec2};

/// Links a mesh entity to the body it draws
#[derive(Component)]
struct BodyMarker(pub BodyId);

/// Unit circle shared by every body, scaled by radius
#[derive(Resource)]
struct BodyMesh(Mesh2dHandle);

pub fn run_2d(scenario: Scenario) {
    let arena = scenario.world.arena();
    info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.world.len());

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "orbsim".into(),
                resolution: (arena.width as f32, arena.height as f32).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (
                speed_input_system,
                resize_system,
                physics_step_system,
                sync_bodies_system,
                draw_trails_system,
                hud_system,
            )
                .chain(),
        )
        .run();
}

fn setup_system(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());
    commands.insert_resource(BodyMesh(Mesh2dHandle(meshes.add(Circle::new(1.0)))));
}

/// ArrowUp doubles the speed multiplier, ArrowDown halves it
fn speed_input_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    if keys.just_pressed(KeyCode::ArrowUp) {
        scenario.world.scale_speed(2.0);
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        scenario.world.scale_speed(0.5);
    }
}

fn resize_system(mut events: EventReader<WindowResized>, mut scenario: ResMut<Scenario>) {
    for e in events.read() {
        scenario.world.resize(e.width as f64, e.height as f64);
    }
}

fn physics_step_system(time: Res<Time>, mut scenario: ResMut<Scenario>) {
    let timestamp_ms = time.elapsed_seconds_f64() * 1000.0;
    scenario.poll_spawners(timestamp_ms);
    scenario.world.tick(timestamp_ms);
}

/// Spawn meshes for new bodies, despawn removed ones, move the rest
fn sync_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mesh: Res<BodyMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &BodyMarker, &mut Transform)>,
) {
    let world = &scenario.world;
    let arena = world.arena();
    let mut drawn = HashSet::new();

    for (entity, BodyMarker(id), mut transform) in &mut query {
        match world.body(*id) {
            Some(b) => {
                let p = to_screen(b.x, &arena);
                transform.translation.x = p.x;
                transform.translation.y = p.y;
                transform.scale = Vec3::splat(b.radius as f32);
                drawn.insert(*id);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for b in world.bodies().iter().filter(|b| !drawn.contains(&b.id())) {
        let p = to_screen(b.x, &arena);
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: mesh.0.clone(),
                material: materials.add(ColorMaterial::from(to_color(b.color, 1.0))),
                transform: Transform::from_xyz(p.x, p.y, 1.0).with_scale(Vec3::splat(b.radius as f32)),
                ..Default::default()
            },
            BodyMarker(b.id()),
        ));
    }
}

/// Trails fade from the oldest point (faint, small) to the newest
fn draw_trails_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let arena = scenario.world.arena();
    for b in scenario.world.bodies() {
        let n = b.trail().len();
        for (i, point) in b.trail().points().enumerate() {
            let t = i as f32 / (n.saturating_sub(1).max(1)) as f32;
            let trail_color = BodyColor::hsl(b.color.hue, 100.0, 40.0);
            let radius = b.radius as f32 * (0.3 + 0.7 * t);
            gizmos.circle_2d(to_screen(*point, &arena), radius, to_color(trail_color, t * 0.6));
        }
    }
}

/// `elapsed s / fps / speed x` in the window title
fn hud_system(scenario: Res<Scenario>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    let clock = scenario.world.clock();
    window.title = format!(
        "{:.0}s / {:.0}fps / {}x / {} bodies",
        clock.last_timestamp().unwrap_or(0.0) / 1000.0,
        clock.fps(),
        scenario.world.params().speed,
        scenario.world.len(),
    );
}

/// Arena coordinates (top-left origin, y down) to camera coordinates (centered, y up)
fn to_screen(p: NVec2, arena: &Arena) -> Vec2 {
    Vec2::new(
        (p.x - arena.width / 2.0) as f32,
        (arena.height / 2.0 - p.y) as f32,
    )
}

fn to_color(c: BodyColor, alpha: f32) -> Color {
    Color::hsla(c.hue, c.saturation / 100.0, c.lightness / 100.0, alpha)
}

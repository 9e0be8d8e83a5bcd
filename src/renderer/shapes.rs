//! Scene geometry for the river lane
//!
//! The simulation lives in 3D lane coordinates (x across the river, z along
//! it); everything here projects that through a fixed perspective camera into
//! the 2D flat-color pipeline. Painter's order: ground, river, obstacles
//! far-to-near, otter, splash droplets.

use glam::{Vec2, Vec3};

use super::vertex::{Vertex, colors};
use crate::consts::{CAMERA_Y, CAMERA_Z};
use crate::sim::GameState;

/// Vertical field of view of 75 degrees, as a focal length
const FOCAL: f32 = 1.3032;
/// Points closer than this to the camera plane are culled
const NEAR: f32 = 0.1;

/// Half extents of the river plane in lane units
const RIVER_HALF_WIDTH: f32 = 10.0;
const RIVER_FAR_Z: f32 = -95.0;
const RIVER_NEAR_Z: f32 = 5.0;
/// The grassy ground plane sits slightly below the water
const GROUND_HALF_WIDTH: f32 = 40.0;
const GROUND_Y: f32 = -0.5;

/// Project a lane-space point through the camera
///
/// The camera sits at `(0, CAMERA_Y, CAMERA_Z)` pitched down to look at the
/// origin. Returns the screen position plus a perspective scale factor for
/// sizing sprites; `None` when the point is at or behind the camera plane.
pub fn project(pos: Vec3) -> Option<(Vec2, f32)> {
    let v = pos - Vec3::new(0.0, CAMERA_Y, CAMERA_Z);

    // Pitch the view so the look direction becomes -z
    let pitch = (CAMERA_Y / CAMERA_Z).atan();
    let (s, c) = pitch.sin_cos();
    let vy = v.y * c - v.z * s;
    let vz = v.y * s + v.z * c;

    let depth = -vz;
    if depth <= NEAR {
        return None;
    }

    let scale = FOCAL / depth;
    Some((Vec2::new(v.x * scale, vy * scale), scale))
}

/// Append a screen-space quad as two triangles
fn push_quad(out: &mut Vec<Vertex>, center: Vec2, half_w: f32, half_h: f32, color: [f32; 4]) {
    let corners = [
        Vec2::new(center.x - half_w, center.y - half_h),
        Vec2::new(center.x + half_w, center.y - half_h),
        Vec2::new(center.x + half_w, center.y + half_h),
        Vec2::new(center.x - half_w, center.y + half_h),
    ];
    push_polygon(out, &corners, color);
}

/// Append a convex screen-space quad given its corners in winding order
fn push_polygon(out: &mut Vec<Vertex>, corners: &[Vec2; 4], color: [f32; 4]) {
    for &(a, b, c) in &[(0, 1, 2), (0, 2, 3)] {
        out.push(Vertex::new(corners[a].x, corners[a].y, color));
        out.push(Vertex::new(corners[b].x, corners[b].y, color));
        out.push(Vertex::new(corners[c].x, corners[c].y, color));
    }
}

/// Project and append a billboard sprite for a lane-space entity
fn push_sprite(out: &mut Vec<Vertex>, pos: Vec3, half_size: f32, color: [f32; 4]) {
    if let Some((screen, scale)) = project(pos) {
        push_quad(out, screen, half_size * scale, half_size * scale, color);
    }
}

/// Project the four corners of an axis-aligned lane-space rectangle at fixed
/// height and append it; skipped entirely if any corner falls behind the
/// camera (never happens for the static planes used here)
fn push_ground_rect(
    out: &mut Vec<Vertex>,
    half_width: f32,
    y: f32,
    near_z: f32,
    far_z: f32,
    color: [f32; 4],
) {
    let corners = [
        Vec3::new(-half_width, y, near_z),
        Vec3::new(half_width, y, near_z),
        Vec3::new(half_width, y, far_z),
        Vec3::new(-half_width, y, far_z),
    ];
    let mut projected = [Vec2::ZERO; 4];
    for (slot, corner) in projected.iter_mut().zip(corners) {
        match project(corner) {
            Some((screen, _)) => *slot = screen,
            None => return,
        }
    }
    push_polygon(out, &projected, color);
}

/// Build the full frame's vertex list from the current game state
///
/// `splash_droplets` caps how many droplets per splash group are drawn
/// (0 disables splash rendering entirely); the simulation itself is never
/// affected by the quality preset.
pub fn build_scene(state: &GameState, splash_droplets: usize) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(64 + state.obstacles.len() * 6);

    push_ground_rect(
        &mut out,
        GROUND_HALF_WIDTH,
        GROUND_Y,
        RIVER_NEAR_Z,
        RIVER_FAR_Z,
        colors::BANK,
    );
    push_ground_rect(
        &mut out,
        RIVER_HALF_WIDTH,
        0.0,
        RIVER_NEAR_Z,
        RIVER_FAR_Z,
        colors::RIVER,
    );

    // Far-to-near so near obstacles draw over far ones
    let mut obstacles: Vec<_> = state.obstacles.iter().collect();
    obstacles.sort_by(|a, b| a.pos.z.total_cmp(&b.pos.z));
    for obstacle in obstacles {
        push_sprite(&mut out, obstacle.pos, 0.5, colors::OBSTACLE);
    }

    push_sprite(&mut out, state.otter.pos, 0.5, colors::OTTER);

    for splash in &state.splashes {
        for droplet in splash.droplets.iter().take(splash_droplets) {
            let mut color = colors::SPLASH;
            color[3] *= droplet.life;
            push_sprite(&mut out, droplet.pos, 0.1, color);
        }
    }

    out
}

//! # Physics Bodies
//!
//! The state every moving actor shares: position, velocity, the
//! grounded/airborne machine, a collision box and health. Players and
//! creatures differ only in their [`Behavior`] tag, which selects how
//! horizontal collisions respond and whether landings hurt.
//!
//! Movement is resolved one axis at a time (X, then Z, then Y). Each axis
//! either commits in full or is rejected, which keeps the body out of solid
//! cells without any continuous sweep.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::{
    spatial::{collides_box, Aabb},
    world::World,
};

/// Clearance left between a landed body and the floor below it.
pub const LANDING_CLEARANCE: f32 = 0.001;

/// How far below the feet the ground probe looks.
pub const GROUND_PROBE_DEPTH: f32 = 0.1;

/// Vertical motion state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    Grounded,
    Airborne,
}

/// Health bounded to `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Fraction of health remaining, for health bars.
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Subtracts `amount`, clamping at zero. Non-positive amounts are ignored.
    ///
    /// # Returns
    /// `true` if health is zero afterwards.
    ///
    /// ```
    /// use voxel_sandbox::engine_state::actors::body::Health;
    ///
    /// let mut health = Health::new(20);
    /// assert!(!health.damage(5));
    /// assert!(!health.damage(-3));
    /// assert_eq!(health.current(), 15);
    /// assert!(health.damage(100));
    /// assert_eq!(health.current(), 0);
    /// ```
    pub fn damage(&mut self, amount: i32) -> bool {
        if amount > 0 {
            self.current = self.current.saturating_sub(amount).max(0);
        }
        self.is_depleted()
    }
}

/// Collision box relative to an actor's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyShape {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BodyShape {
    /// A player-style box hanging below an eye position: `height` tall,
    /// `radius` wide on each side, with its top `head_gap` below the eye.
    pub fn eye_box(radius: f32, height: f32, head_gap: f32) -> Self {
        Self {
            min: Vector3::new(-radius, -height, -radius),
            max: Vector3::new(radius, -head_gap, radius),
        }
    }

    /// A box standing on the actor's position, covering `height` above it.
    pub fn column(height: f32) -> Self {
        Self {
            min: Vector3::new(0.0, 0.0, 0.0),
            max: Vector3::new(0.0, height, 0.0),
        }
    }

    /// The box placed at `position`.
    pub fn at(&self, position: Point3<f32>) -> Aabb {
        Aabb::new(position + self.min, position + self.max)
    }
}

/// How a body reacts to a blocked horizontal move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollisionResponse {
    /// Zero the blocked velocity component.
    Stop,
    /// Multiply the blocked velocity component by the factor.
    Bounce(f32),
}

impl CollisionResponse {
    fn apply(self, velocity: &mut f32) {
        match self {
            CollisionResponse::Stop => *velocity = 0.0,
            CollisionResponse::Bounce(factor) => *velocity *= factor,
        }
    }
}

/// Who drives a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    PlayerControl,
    CreatureAi { bounce_factor: f32 },
}

impl Behavior {
    pub fn collision_response(self) -> CollisionResponse {
        match self {
            Behavior::PlayerControl => CollisionResponse::Stop,
            Behavior::CreatureAi { bounce_factor } => CollisionResponse::Bounce(bounce_factor),
        }
    }

    pub fn takes_fall_damage(self) -> bool {
        matches!(self, Behavior::PlayerControl)
    }
}

/// What happened during one [`PhysicsBody::resolve_moves`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub blocked_x: bool,
    pub blocked_z: bool,
    /// Downward speed at the moment of landing, if the body landed.
    pub landed: Option<f32>,
    /// The body walked off a ledge.
    pub left_ground: bool,
}

/// A moving actor's physical state.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsBody {
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
    pub state: MotionState,
    pub shape: BodyShape,
    pub health: Health,
    pub behavior: Behavior,
}

impl PhysicsBody {
    /// Creates an airborne body at rest.
    pub fn new(position: Point3<f32>, shape: BodyShape, max_health: i32, behavior: Behavior) -> Self {
        Self {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            state: MotionState::Airborne,
            shape,
            health: Health::new(max_health),
            behavior,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.state == MotionState::Grounded
    }

    /// World-space height of the bottom of the collision box.
    pub fn feet(&self) -> f32 {
        self.position.y + self.shape.min.y
    }

    pub fn aabb(&self) -> Aabb {
        self.shape.at(self.position)
    }

    /// Integrates the vertical velocity for one step.
    ///
    /// Airborne bodies accelerate downward. Grounded bodies rest at zero
    /// vertical speed unless `launch` gives a take-off speed, which makes
    /// them airborne.
    pub fn update_vertical(&mut self, gravity: f32, dt: f32, launch: Option<f32>) {
        match self.state {
            MotionState::Airborne => self.velocity.y -= gravity * dt,
            MotionState::Grounded => match launch {
                Some(speed) => {
                    self.velocity.y = speed;
                    self.state = MotionState::Airborne;
                }
                None => self.velocity.y = 0.0,
            },
        }
    }

    /// Overwrites the velocity and leaves the ground.
    pub fn launch(&mut self, velocity: Vector3<f32>) {
        self.velocity = velocity;
        self.state = MotionState::Airborne;
    }

    /// Moves the body by `delta`, one axis at a time, against the world.
    pub fn resolve_moves(&mut self, world: &World, delta: Vector3<f32>) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if !(delta.x.is_finite() && delta.y.is_finite() && delta.z.is_finite()) {
            return outcome;
        }
        let response = self.behavior.collision_response();

        if delta.x != 0.0 {
            let candidate = self.position + Vector3::new(delta.x, 0.0, 0.0);
            if collides_box(world, &self.shape.at(candidate)) {
                response.apply(&mut self.velocity.x);
                outcome.blocked_x = true;
            } else {
                self.position = candidate;
            }
        }

        if delta.z != 0.0 {
            let candidate = self.position + Vector3::new(0.0, 0.0, delta.z);
            if collides_box(world, &self.shape.at(candidate)) {
                response.apply(&mut self.velocity.z);
                outcome.blocked_z = true;
            } else {
                self.position = candidate;
            }
        }

        if delta.y != 0.0 {
            let candidate = self.position + Vector3::new(0.0, delta.y, 0.0);
            if collides_box(world, &self.shape.at(candidate)) {
                if self.velocity.y < 0.0
                    && (self.snap_to_floor(world, delta.y) || self.has_ground(world))
                {
                    outcome.landed = Some(-self.velocity.y);
                    self.state = MotionState::Grounded;
                }
                self.velocity.y = 0.0;
            } else {
                self.position = candidate;
            }
        }

        if self.state == MotionState::Grounded && !self.has_ground(world) {
            self.state = MotionState::Airborne;
            outcome.left_ground = true;
        }

        outcome
    }

    /// Returns `true` if there is a solid cell just below the feet.
    pub fn has_ground(&self, world: &World) -> bool {
        let probe = self.feet() - GROUND_PROBE_DEPTH;
        let aabb = self.aabb();
        collides_box(
            world,
            &Aabb::new(
                Point3::new(aabb.min.x, probe, aabb.min.z),
                Point3::new(aabb.max.x, probe, aabb.max.z),
            ),
        )
    }

    /// Places the feet just above the highest solid cell between the current
    /// feet and `feet + dy`.
    ///
    /// Returns `false`, leaving the body in place, when the snapped box would
    /// overlap a block.
    fn snap_to_floor(&mut self, world: &World, dy: f32) -> bool {
        let aabb = self.aabb();
        let top = self.feet().floor() as i32;
        let bottom = (self.feet() + dy).floor() as i32;

        let floor_cell = (bottom..=top)
            .rev()
            .find(|&y| {
                let y = y as f32 + 0.5;
                collides_box(
                    world,
                    &Aabb::new(
                        Point3::new(aabb.min.x, y, aabb.min.z),
                        Point3::new(aabb.max.x, y, aabb.max.z),
                    ),
                )
            })
            .unwrap_or(bottom);

        let feet = floor_cell as f32 + 1.0 + LANDING_CLEARANCE;
        let snapped = Point3::new(
            self.position.x,
            feet - self.shape.min.y,
            self.position.z,
        );
        if collides_box(world, &self.shape.at(snapped)) {
            return false;
        }
        self.position = snapped;
        true
    }
}

/// Damage taken when landing at `impact` speed.
///
/// ```
/// use voxel_sandbox::engine_state::actors::body::fall_damage;
///
/// assert_eq!(fall_damage(15.0, 15.0, 2.0), 0);
/// assert_eq!(fall_damage(20.0, 15.0, 2.0), 10);
/// ```
pub fn fall_damage(impact: f32, threshold: f32, multiplier: f32) -> i32 {
    let impact = impact.abs();
    if impact > threshold {
        ((impact - threshold) * multiplier).floor() as i32
    } else {
        0
    }
}

/// Horizontal speed factor. Running wins when both inputs are held.
pub fn speed_multiplier(running: bool, crouching: bool, run: f32, crouch: f32) -> f32 {
    if running {
        run
    } else if crouching {
        crouch
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockKind;
    use proptest::prelude::*;

    fn floor_world(y: i32) -> World {
        let mut world = World::new();
        for x in -3..=3 {
            for z in -3..=3 {
                world.add_block(Point3::new(x, y, z), BlockKind::Stone);
            }
        }
        world
    }

    fn player_body(position: Point3<f32>) -> PhysicsBody {
        PhysicsBody::new(
            position,
            BodyShape::eye_box(0.3, 1.8, 0.1),
            100,
            Behavior::PlayerControl,
        )
    }

    #[test]
    fn speed_multiplier_orders_modes() {
        assert!(speed_multiplier(true, false, 1.6, 0.5) > 1.0);
        assert!(speed_multiplier(false, true, 1.6, 0.5) < 1.0);
        assert_eq!(speed_multiplier(false, false, 1.6, 0.5), 1.0);
        assert_eq!(speed_multiplier(true, true, 1.6, 0.5), 1.6);
    }

    #[test]
    fn fall_damage_threshold() {
        assert_eq!(fall_damage(14.9, 15.0, 2.0), 0);
        assert_eq!(fall_damage(15.0, 15.0, 2.0), 0);
        assert_eq!(fall_damage(20.0, 15.0, 2.0), 10);
        assert_eq!(fall_damage(-20.0, 15.0, 2.0), 10);
    }

    #[test]
    fn falling_body_lands_on_top_of_floor() {
        let world = floor_world(0);
        let mut body = player_body(Point3::new(0.5, 3.0, 0.5));
        body.velocity.y = -8.0;

        // one big step that would pass into the floor
        let outcome = body.resolve_moves(&world, Vector3::new(0.0, -2.0, 0.0));
        assert_eq!(outcome.landed, Some(8.0));
        assert!(body.is_grounded());
        assert!((body.feet() - (1.0 + LANDING_CLEARANCE)).abs() < 1e-4);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn player_stops_at_walls() {
        let mut world = floor_world(0);
        world.add_block(Point3::new(2, 1, 0), BlockKind::Stone);
        let mut body = player_body(Point3::new(1.5, 2.801, 0.5));
        body.state = MotionState::Grounded;
        body.velocity.x = 5.0;

        let outcome = body.resolve_moves(&world, Vector3::new(0.4, 0.0, 0.0));
        assert!(outcome.blocked_x);
        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(body.position.x, 1.5);
    }

    #[test]
    fn creature_bounces_off_walls() {
        let mut world = World::new();
        world.add_block(Point3::new(1, 0, 0), BlockKind::Dirt);
        let mut body = PhysicsBody::new(
            Point3::new(0.5, 0.2, 0.5),
            BodyShape::column(0.5),
            20,
            Behavior::CreatureAi {
                bounce_factor: -0.5,
            },
        );
        body.velocity.x = 2.0;
        let outcome = body.resolve_moves(&world, Vector3::new(0.6, 0.0, 0.0));
        assert!(outcome.blocked_x);
        assert_eq!(body.velocity.x, -1.0);
    }

    #[test]
    fn walking_off_a_ledge_becomes_airborne() {
        let mut world = World::new();
        world.add_block(Point3::new(0, 0, 0), BlockKind::Stone);
        let mut body = player_body(Point3::new(0.5, 1.0 + LANDING_CLEARANCE + 1.8, 0.5));
        body.state = MotionState::Grounded;
        assert!(body.has_ground(&world));

        let outcome = body.resolve_moves(&world, Vector3::new(1.0, 0.0, 0.0));
        assert!(outcome.left_ground);
        assert_eq!(body.state, MotionState::Airborne);
    }

    #[test]
    fn grounded_jump_launches() {
        let mut body = player_body(Point3::new(0.0, 5.0, 0.0));
        body.state = MotionState::Grounded;
        body.velocity.y = -3.0;
        body.update_vertical(15.0, 0.1, None);
        assert_eq!(body.velocity.y, 0.0);
        body.update_vertical(15.0, 0.1, Some(6.0));
        assert_eq!(body.velocity.y, 6.0);
        assert_eq!(body.state, MotionState::Airborne);
        body.update_vertical(15.0, 0.1, Some(6.0));
        assert!((body.velocity.y - 4.5).abs() < 1e-6);
    }

    #[test]
    fn blocked_fall_without_support_stays_airborne() {
        // wedged between two stacked blocks: the snap target is occupied and
        // the cell under the feet is empty
        let mut world = World::new();
        world.add_block(Point3::new(0, 2, 0), BlockKind::Stone);
        world.add_block(Point3::new(0, 3, 0), BlockKind::Stone);
        let mut body = PhysicsBody::new(
            Point3::new(0.5, 2.05, 0.5),
            BodyShape::column(0.5),
            20,
            Behavior::CreatureAi {
                bounce_factor: -0.5,
            },
        );
        body.velocity.y = -5.0;

        let outcome = body.resolve_moves(&world, Vector3::new(0.0, -0.5, 0.0));
        assert_eq!(outcome.landed, None);
        assert_eq!(body.state, MotionState::Airborne);
        assert_eq!(body.position, Point3::new(0.5, 2.05, 0.5));
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn non_finite_moves_are_ignored() {
        let world = floor_world(0);
        let mut body = player_body(Point3::new(0.5, 5.0, 0.5));
        body.resolve_moves(&world, Vector3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(body.position, Point3::new(0.5, 5.0, 0.5));
    }

    proptest! {
        #[test]
        fn health_stays_within_bounds(
            max in 0i32..500,
            hits in prop::collection::vec(-50i32..200, 0..20),
        ) {
            let mut health = Health::new(max);
            for hit in hits {
                let before = health.current();
                let depleted = health.damage(hit);
                prop_assert!(health.current() >= 0);
                prop_assert!(health.current() <= before);
                prop_assert_eq!(depleted, health.current() == 0);
                if hit <= 0 {
                    prop_assert_eq!(health.current(), before);
                }
            }
        }

        #[test]
        fn damage_is_never_negative(impact in -100.0f32..100.0) {
            let damage = fall_damage(impact, 15.0, 2.0);
            prop_assert!(damage >= 0);
            prop_assert_eq!(damage == 0, impact.abs() < 15.5);
        }
    }
}

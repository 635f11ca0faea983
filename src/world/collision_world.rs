//! Storage side of the collision engine.
//!
//! A [`CollisionWorld`] owns an insertion-ordered list of primitives, each a
//! shape plus caller data, and the two counters the resolver uses to bound
//! reentrant collide calls. Queries live in the `query` module.
//!
//! # Example
//!
//! ```
//! use rs_collision::models::{Aabb, Sphere};
//! use rs_collision::world::CollisionWorld;
//!
//! let mut world: CollisionWorld<&str, u32> = CollisionWorld::new("level 1");
//! let floor = world.add_aabb(Aabb::new((0.0, 0.0, 0.0), (10.0, 1.0, 10.0)), 1).unwrap();
//! world.add_sphere(Sphere::new((5.0, 3.0, 5.0), 1.0), 2).unwrap();
//!
//! assert_eq!(world.len(), 2);
//! assert_eq!(world.primitive_user_data(floor), Some(&1));
//! assert_eq!(world.remove_primitive(floor), Ok(1));
//! assert_eq!(*world.user_data(), "level 1");
//! ```
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::dispatch::registry;
use crate::models::{Aabb, AabbExtent, Capsule, Ellipse, Obb, Shape, ShapeType, Sphere};
use crate::utils::{CollisionConstants, CollisionError};

/// Handle returned when a primitive is added to a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u64);

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a primitive's shape lives.
///
/// `Owned` shapes are copies held by the world. `Referenced` boxes belong
/// to the caller: the world only reads the cell and releases its handle on
/// removal, so the caller can keep moving the box between queries.
#[derive(Debug, Clone)]
pub enum ShapeStorage {
    Owned(Shape),
    Referenced(Rc<Cell<Aabb>>),
}

impl ShapeStorage {
    /// Current value of the stored shape.
    pub fn shape(&self) -> Shape {
        match self {
            ShapeStorage::Owned(shape) => *shape,
            ShapeStorage::Referenced(cell) => Shape::Aabb(cell.get()),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ShapeStorage::Referenced(_))
    }

    /// Whether this storage reads the given caller-owned cell.
    pub fn refers_to(&self, cell: &Rc<Cell<Aabb>>) -> bool {
        match self {
            ShapeStorage::Referenced(own) => Rc::ptr_eq(own, cell),
            ShapeStorage::Owned(_) => false,
        }
    }
}

/// A shape stored in a world together with caller data.
#[derive(Debug)]
pub struct Primitive<P> {
    id: PrimitiveId,
    storage: ShapeStorage,
    user_data: P,
}

impl<P> Primitive<P> {
    pub fn id(&self) -> PrimitiveId {
        self.id
    }

    pub fn shape(&self) -> Shape {
        self.storage.shape()
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape().shape_type()
    }

    pub fn storage(&self) -> &ShapeStorage {
        &self.storage
    }

    pub fn user_data(&self) -> &P {
        &self.user_data
    }
}

/// A set of collision primitives plus world-level caller data.
///
/// `W` is the data attached to the world, `P` the data attached to each
/// primitive. Queries take `&self`, so a response callback may issue new
/// queries against the same world; the `packets` and `rejected` counters
/// track that nesting and return to zero when the outermost query returns.
pub struct CollisionWorld<W, P> {
    pub(crate) primitives: Vec<Primitive<P>>,
    pub(crate) packets: Cell<u32>,
    pub(crate) rejected: Cell<u32>,
    pub(crate) constants: CollisionConstants,
    user_data: W,
    next_id: u64,
}

impl<W, P> CollisionWorld<W, P> {
    /// Creates an empty world with the default iteration and recursion caps.
    pub fn new(user_data: W) -> Self {
        Self::with_constants(user_data, CollisionConstants::default())
    }

    /// Creates an empty world with custom caps.
    ///
    /// # Example
    /// ```
    /// use rs_collision::utils::CollisionConstants;
    /// use rs_collision::world::CollisionWorld;
    ///
    /// let constants = CollisionConstants::new(Some(5), Some(3), None);
    /// let world: CollisionWorld<(), ()> = CollisionWorld::with_constants((), constants);
    ///
    /// assert_eq!(world.constants().max_iterations, 5);
    /// assert_eq!(world.constants().sweep_push_threshold, 1.0);
    /// ```
    pub fn with_constants(user_data: W, constants: CollisionConstants) -> Self {
        // Build the dispatch tables before the first query needs them
        registry();

        CollisionWorld {
            primitives: Vec::new(),
            packets: Cell::new(0),
            rejected: Cell::new(0),
            constants,
            user_data,
            next_id: 0,
        }
    }

    fn push(&mut self, storage: ShapeStorage, user_data: P) -> Result<PrimitiveId, CollisionError> {
        storage.shape().validate().map_err(CollisionError::InvalidShape)?;

        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        trace!("Adding {} primitive {}", storage.shape().shape_type(), id);
        self.primitives.push(Primitive { id, storage, user_data });
        Ok(id)
    }

    /// Adds a copy of `shape`.
    ///
    /// # Errors
    ///
    /// Returns `CollisionError::InvalidShape` for non-finite coordinates,
    /// inverted boxes and negative sizes.
    pub fn add_shape(&mut self, shape: Shape, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.push(ShapeStorage::Owned(shape), user_data)
    }

    pub fn add_aabb(&mut self, aabb: Aabb, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.add_shape(Shape::Aabb(aabb), user_data)
    }

    pub fn add_aabb_extent(&mut self, aabb: AabbExtent, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.add_shape(Shape::AabbExtent(aabb), user_data)
    }

    pub fn add_obb(&mut self, obb: Obb, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.add_shape(Shape::Obb(obb), user_data)
    }

    pub fn add_sphere(&mut self, sphere: Sphere, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.add_shape(Shape::Sphere(sphere), user_data)
    }

    /// Adds an ellipse. No intersection routine exists for ellipses, so the
    /// primitive is stored but never reported as colliding.
    pub fn add_ellipse(&mut self, ellipse: Ellipse, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.add_shape(Shape::Ellipse(ellipse), user_data)
    }

    pub fn add_capsule(&mut self, capsule: Capsule, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.add_shape(Shape::Capsule(capsule), user_data)
    }

    /// Adds a box the caller keeps ownership of. Every query reads the
    /// cell's current value.
    ///
    /// # Example
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use rs_collision::models::{Aabb, Shape};
    /// use rs_collision::world::CollisionWorld;
    ///
    /// let door = Rc::new(Cell::new(Aabb::new((0.0, 0.0, 0.0), (1.0, 2.0, 0.2))));
    /// let mut world: CollisionWorld<(), &str> = CollisionWorld::new(());
    /// let id = world.add_aabb_ref(Rc::clone(&door), "door").unwrap();
    ///
    /// door.set(Aabb::new((3.0, 0.0, 0.0), (4.0, 2.0, 0.2)));
    /// let shape = world.primitive(id).unwrap().shape();
    /// assert_eq!(shape, Shape::Aabb(Aabb::new((3.0, 0.0, 0.0), (4.0, 2.0, 0.2))));
    /// ```
    pub fn add_aabb_ref(&mut self, aabb: Rc<Cell<Aabb>>, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.push(ShapeStorage::Referenced(aabb), user_data)
    }

    /// Removes a primitive, keeping the order of the rest, and hands back
    /// its user data.
    pub fn remove_primitive(&mut self, id: PrimitiveId) -> Result<P, CollisionError> {
        let index = self
            .primitives
            .iter()
            .position(|primitive| primitive.id == id)
            .ok_or(CollisionError::PrimitiveNotFound(id))?;

        let primitive = self.primitives.remove(index);
        trace!(
            "Removed primitive {} ({})",
            id,
            if primitive.storage.is_reference() { "referenced" } else { "owned" }
        );
        Ok(primitive.user_data)
    }

    pub fn primitive(&self, id: PrimitiveId) -> Option<&Primitive<P>> {
        self.primitives.iter().find(|primitive| primitive.id == id)
    }

    pub fn primitive_user_data(&self, id: PrimitiveId) -> Option<&P> {
        self.primitive(id).map(Primitive::user_data)
    }

    pub fn primitive_user_data_mut(&mut self, id: PrimitiveId) -> Option<&mut P> {
        self.primitives
            .iter_mut()
            .find(|primitive| primitive.id == id)
            .map(|primitive| &mut primitive.user_data)
    }

    /// Primitives in insertion order.
    pub fn primitives(&self) -> &[Primitive<P>] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn user_data(&self) -> &W {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut W {
        &mut self.user_data
    }

    pub fn constants(&self) -> CollisionConstants {
        self.constants
    }

    /// Collide calls currently on the stack for this world.
    pub fn packets(&self) -> u32 {
        self.packets.get()
    }

    /// Calls refused by the recursion guard since the outermost call began.
    pub fn rejected(&self) -> u32 {
        self.rejected.get()
    }
}

impl<W, P> Drop for CollisionWorld<W, P> {
    fn drop(&mut self) {
        let referenced = self.primitives.iter().filter(|p| p.storage.is_reference()).count();
        trace!(
            "Dropping collision world: {} owned, {} referenced primitives",
            self.primitives.len() - referenced,
            referenced
        );
    }
}

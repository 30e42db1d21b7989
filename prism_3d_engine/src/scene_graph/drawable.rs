/// Drawables: objects a camera can draw.

use super::scene::ObjectKey;
use super::transformation::TransformationMatrix;

/// Something that can be drawn from a camera's point of view
pub trait Drawable<M: TransformationMatrix> {
    /// Draw with the object-to-camera transformation and the camera projection
    fn draw(&mut self, transformation: &M, projection: &M);
}

impl<M, F> Drawable<M> for F
where
    M: TransformationMatrix,
    F: FnMut(&M, &M),
{
    fn draw(&mut self, transformation: &M, projection: &M) {
        self(transformation, projection)
    }
}

/// Ordered collection of drawables, each bound to a scene object.
///
/// Insertion order is draw order.
pub struct DrawableGroup<M: TransformationMatrix> {
    drawables: Vec<(ObjectKey, Box<dyn Drawable<M>>)>,
}

impl<M: TransformationMatrix> DrawableGroup<M> {
    pub fn new() -> Self {
        Self { drawables: Vec::new() }
    }

    /// Append a drawable bound to `object`. Returns its index in the group.
    pub fn add(&mut self, object: ObjectKey, drawable: Box<dyn Drawable<M>>) -> usize {
        self.drawables.push((object, drawable));
        self.drawables.len() - 1
    }

    /// Remove the drawable at `index`, shifting later ones down
    pub fn remove(&mut self, index: usize) -> Option<(ObjectKey, Box<dyn Drawable<M>>)> {
        (index < self.drawables.len()).then(|| self.drawables.remove(index))
    }

    /// Drop every drawable bound to `object`
    pub fn remove_object(&mut self, object: ObjectKey) {
        self.drawables.retain(|(key, _)| *key != object);
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Objects of the drawables, in draw order
    pub fn objects(&self) -> impl Iterator<Item = ObjectKey> + '_ {
        self.drawables.iter().map(|(object, _)| *object)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectKey, &mut Box<dyn Drawable<M>>)> + '_ {
        self.drawables.iter_mut().map(|(object, drawable)| (*object, drawable))
    }
}

impl<M: TransformationMatrix> Default for DrawableGroup<M> {
    fn default() -> Self {
        Self::new()
    }
}

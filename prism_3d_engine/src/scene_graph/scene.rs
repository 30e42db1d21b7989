/// Scene: hierarchical object arena with cached transformations.
///
/// Objects and features live in two SlotMaps owned by the scene, so keys stay
/// stable across removals and parent/child links are plain keys.
///
/// Every object caches its absolute transformation (and, when one of its
/// features asks for it, the inverse). The cache follows a dirty/clean
/// protocol:
/// - changing a local transformation marks the object and its whole subtree
///   dirty (`set_dirty`)
/// - `set_clean` recomputes the dirty chain from the topmost dirty ancestor
///   down to the object, then notifies features
/// - cleaning a clean object does nothing

use std::any::Any;
use slotmap::{new_key_type, SlotMap};
use crate::error::{Error, Result};
use super::feature::{CachedTransformation, CachedTransformations, Feature};
use super::transformation::TransformationMatrix;

new_key_type! {
    /// Stable key identifying an object in a Scene
    pub struct ObjectKey;
    /// Stable key identifying a feature in a Scene
    pub struct FeatureKey;
}

/// Scene graph node
struct Object<M: TransformationMatrix> {
    parent: Option<ObjectKey>,
    children: Vec<ObjectKey>,
    transformation: M,
    absolute: M,
    inverted_absolute: M,
    dirty: bool,
    /// Attached features, in attachment order
    features: Vec<FeatureKey>,
    /// Union of the variants requested by `features`
    cached: CachedTransformations,
}

impl<M: TransformationMatrix> Object<M> {
    fn new(parent: Option<ObjectKey>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            transformation: M::IDENTITY,
            absolute: M::IDENTITY,
            inverted_absolute: M::IDENTITY,
            dirty: true,
            features: Vec::new(),
            cached: CachedTransformations::empty(),
        }
    }
}

struct FeatureSlot<M: TransformationMatrix> {
    object: ObjectKey,
    requested: CachedTransformations,
    feature: Box<dyn Feature<M>>,
}

/// Hierarchical scene of objects and their features
pub struct Scene<M: TransformationMatrix> {
    objects: SlotMap<ObjectKey, Object<M>>,
    features: SlotMap<FeatureKey, FeatureSlot<M>>,
    root: ObjectKey,
}

impl<M: TransformationMatrix> Scene<M> {
    /// Create a scene containing only its root object
    pub fn new() -> Self {
        let mut objects = SlotMap::with_key();
        let root = objects.insert(Object::new(None));
        Self {
            objects,
            features: SlotMap::with_key(),
            root,
        }
    }

    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("prism3d::Scene", "{}", error);
        error
    }

    fn invalid_object(key: ObjectKey) -> Error {
        Self::log_and_return_error(Error::InvalidObject(format!("unknown object {:?}", key)))
    }

    fn invalid_feature(key: FeatureKey) -> Error {
        Self::log_and_return_error(Error::InvalidObject(format!("unknown feature {:?}", key)))
    }

    fn object(&self, key: ObjectKey) -> Result<&Object<M>> {
        self.objects.get(key).ok_or_else(|| Self::invalid_object(key))
    }

    fn object_mut(&mut self, key: ObjectKey) -> Result<&mut Object<M>> {
        self.objects.get_mut(key).ok_or_else(|| Self::invalid_object(key))
    }

    // ===== HIERARCHY =====

    /// Root object. It has no parent and cannot be removed or reparented.
    pub fn root(&self) -> ObjectKey {
        self.root
    }

    /// Number of objects, root included
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether the key names a live object
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Add a new object under `parent`. New objects are dirty.
    pub fn add_object(&mut self, parent: ObjectKey) -> Result<ObjectKey> {
        self.object(parent)?;
        let key = self.objects.insert(Object::new(Some(parent)));
        self.objects[parent].children.push(key);
        Ok(key)
    }

    /// Remove an object, its whole subtree and every attached feature
    pub fn remove_object(&mut self, key: ObjectKey) -> Result<()> {
        if key == self.root {
            return Err(Self::log_and_return_error(Error::InvalidOperation(
                "the root object cannot be removed".to_string(),
            )));
        }
        let parent = self.object(key)?.parent;
        if let Some(parent) = parent {
            self.objects[parent].children.retain(|&child| child != key);
        }

        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(object) = self.objects.remove(current) {
                for feature in object.features {
                    self.features.remove(feature);
                }
                stack.extend(object.children);
            }
        }
        Ok(())
    }

    /// Parent of an object (`None` for the root or an unknown key)
    pub fn parent(&self, key: ObjectKey) -> Option<ObjectKey> {
        self.objects.get(key).and_then(|object| object.parent)
    }

    /// Children of an object, in insertion order
    pub fn children(&self, key: ObjectKey) -> Option<&[ObjectKey]> {
        self.objects.get(key).map(|object| object.children.as_slice())
    }

    /// Move an object (with its subtree) under a new parent.
    ///
    /// Fails with `InvalidOperation` for the root or when `new_parent` is the
    /// object itself or one of its descendants.
    pub fn set_parent(&mut self, key: ObjectKey, new_parent: ObjectKey) -> Result<()> {
        self.object(key)?;
        self.object(new_parent)?;
        if key == self.root {
            return Err(Self::log_and_return_error(Error::InvalidOperation(
                "the root object cannot be reparented".to_string(),
            )));
        }

        let mut ancestor = Some(new_parent);
        while let Some(current) = ancestor {
            if current == key {
                return Err(Self::log_and_return_error(Error::InvalidOperation(format!(
                    "cannot move {:?} under its own descendant {:?}",
                    key, new_parent
                ))));
            }
            ancestor = self.objects[current].parent;
        }

        if let Some(old_parent) = self.objects[key].parent {
            self.objects[old_parent].children.retain(|&child| child != key);
        }
        self.objects[new_parent].children.push(key);
        self.objects[key].parent = Some(new_parent);
        self.mark_subtree_dirty(key);
        Ok(())
    }

    // ===== LOCAL TRANSFORMATION =====

    /// Local transformation (relative to the parent)
    pub fn transformation(&self, key: ObjectKey) -> Option<M> {
        self.objects.get(key).map(|object| object.transformation)
    }

    /// Replace the local transformation
    pub fn set_transformation(&mut self, key: ObjectKey, transformation: M) -> Result<()> {
        self.object_mut(key)?.transformation = transformation;
        self.mark_subtree_dirty(key);
        Ok(())
    }

    /// Apply `transformation` after the current one (in parent space)
    pub fn transform(&mut self, key: ObjectKey, transformation: M) -> Result<()> {
        let object = self.object_mut(key)?;
        object.transformation = transformation * object.transformation;
        self.mark_subtree_dirty(key);
        Ok(())
    }

    /// Apply `transformation` before the current one (in local space)
    pub fn transform_local(&mut self, key: ObjectKey, transformation: M) -> Result<()> {
        let object = self.object_mut(key)?;
        object.transformation = object.transformation * transformation;
        self.mark_subtree_dirty(key);
        Ok(())
    }

    /// Absolute transformation, cleaning the object first if needed
    pub fn absolute_transformation(&mut self, key: ObjectKey) -> Result<M> {
        self.object(key)?;
        self.clean(key);
        Ok(self.objects[key].absolute)
    }

    // ===== DIRTY / CLEAN =====

    /// Whether the cached transformations of an object are out of date
    pub fn is_dirty(&self, key: ObjectKey) -> Option<bool> {
        self.objects.get(key).map(|object| object.dirty)
    }

    /// Mark an object and all its descendants dirty
    pub fn set_dirty(&mut self, key: ObjectKey) -> Result<()> {
        self.object(key)?;
        self.mark_subtree_dirty(key);
        Ok(())
    }

    /// Bring the cached transformations of an object up to date
    pub fn set_clean(&mut self, key: ObjectKey) -> Result<()> {
        self.object(key)?;
        self.clean(key);
        Ok(())
    }

    /// Clean a batch of objects
    pub fn set_clean_all(&mut self, keys: &[ObjectKey]) -> Result<()> {
        for &key in keys {
            self.object(key)?;
        }
        for &key in keys {
            self.clean(key);
        }
        Ok(())
    }

    // Dirty descendants of an already dirty object are dirty too, so the walk
    // stops there.
    fn mark_subtree_dirty(&mut self, key: ObjectKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let object = &mut self.objects[current];
            if object.dirty {
                continue;
            }
            object.dirty = true;
            for &feature in &object.features {
                self.features[feature].feature.mark_dirty();
            }
            stack.extend(object.children.iter().copied());
        }
    }

    /// Clean a known-valid object
    pub(super) fn clean(&mut self, key: ObjectKey) {
        // Dirty chain, from the object up to (excluding) the first clean ancestor
        let mut chain = Vec::new();
        let mut current = Some(key);
        while let Some(object) = current {
            if !self.objects[object].dirty {
                break;
            }
            chain.push(object);
            current = self.objects[object].parent;
        }

        for &object_key in chain.iter().rev() {
            let parent_absolute = self.objects[object_key]
                .parent
                .map(|parent| self.objects[parent].absolute);

            let object = &mut self.objects[object_key];
            object.absolute = match parent_absolute {
                Some(parent_absolute) => parent_absolute * object.transformation,
                None => object.transformation,
            };
            if object.cached.contains(CachedTransformations::INVERTED_ABSOLUTE) {
                object.inverted_absolute = object.absolute.inverted();
            }
            object.dirty = false;

            let object = &self.objects[object_key];
            for &feature_key in &object.features {
                Self::deliver(&mut self.features[feature_key], object);
            }
        }
    }

    fn deliver(slot: &mut FeatureSlot<M>, object: &Object<M>) {
        if slot.requested.contains(CachedTransformations::ABSOLUTE) {
            slot.feature.on_transformation_changed(CachedTransformation::Absolute, &object.absolute);
        }
        if slot.requested.contains(CachedTransformations::INVERTED_ABSOLUTE) {
            slot.feature.on_transformation_changed(
                CachedTransformation::InvertedAbsolute,
                &object.inverted_absolute,
            );
        }
    }

    fn refresh_cached(&mut self, object_key: ObjectKey) {
        let features = &self.features;
        let object = &mut self.objects[object_key];
        let previous = object.cached;
        object.cached = object
            .features
            .iter()
            .fold(CachedTransformations::empty(), |acc, &f| acc | features[f].requested);

        // A clean object that starts caching its inverse needs it right away
        if !object.dirty
            && object.cached.contains(CachedTransformations::INVERTED_ABSOLUTE)
            && !previous.contains(CachedTransformations::INVERTED_ABSOLUTE)
        {
            object.inverted_absolute = object.absolute.inverted();
        }
    }

    // ===== FEATURES =====

    /// Attach a feature to an object.
    ///
    /// If the object is clean, the requested transformations are delivered
    /// to the new feature immediately; otherwise at the next clean.
    pub fn attach_feature(&mut self, object: ObjectKey, feature: Box<dyn Feature<M>>) -> Result<FeatureKey> {
        self.object(object)?;
        let requested = feature.cached_transformations();
        let key = self.features.insert(FeatureSlot { object, requested, feature });
        self.objects[object].features.push(key);
        self.refresh_cached(object);

        let owner = &self.objects[object];
        if !owner.dirty {
            Self::deliver(&mut self.features[key], owner);
        }
        Ok(key)
    }

    /// Detach a feature and hand it back
    pub fn detach_feature(&mut self, key: FeatureKey) -> Result<Box<dyn Feature<M>>> {
        let slot = self.features.remove(key).ok_or_else(|| Self::invalid_feature(key))?;
        self.objects[slot.object].features.retain(|&f| f != key);
        self.refresh_cached(slot.object);
        Ok(slot.feature)
    }

    /// Change which transformations a feature receives
    pub fn set_cached_transformations(&mut self, key: FeatureKey, cached: CachedTransformations) -> Result<()> {
        let slot = self.features.get_mut(key).ok_or_else(|| Self::invalid_feature(key))?;
        slot.requested = cached;
        let object = slot.object;
        self.refresh_cached(object);
        Ok(())
    }

    /// Transformations a feature currently receives
    pub fn cached_transformations(&self, key: FeatureKey) -> Option<CachedTransformations> {
        self.features.get(key).map(|slot| slot.requested)
    }

    /// Object a feature is attached to
    pub fn feature_object(&self, key: FeatureKey) -> Option<ObjectKey> {
        self.features.get(key).map(|slot| slot.object)
    }

    /// Features attached to an object, in attachment order
    pub fn features(&self, object: ObjectKey) -> Option<&[FeatureKey]> {
        self.objects.get(object).map(|object| object.features.as_slice())
    }

    /// Borrow a feature as its concrete type
    pub fn feature<F: Feature<M>>(&self, key: FeatureKey) -> Option<&F> {
        self.features.get(key).and_then(|slot| slot.feature.as_any().downcast_ref::<F>())
    }

    /// Mutably borrow a feature as its concrete type
    pub fn feature_mut<F: Feature<M>>(&mut self, key: FeatureKey) -> Option<&mut F> {
        self.features
            .get_mut(key)
            .and_then(|slot| slot.feature.as_any_mut().downcast_mut::<F>())
    }

    /// Borrow a feature as `Any`, whatever its concrete type
    pub fn feature_any(&self, key: FeatureKey) -> Option<&dyn Any> {
        self.features.get(key).map(|slot| slot.feature.as_any())
    }
}

impl<M: TransformationMatrix> Default for Scene<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;

//! Reusable path buffer

use glam::Vec2;
use std::ops::{Deref, DerefMut};

/// Initial verb capacity; decals and particle shapes stay well below it so
/// the buffer does not grow after the first frame.
const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathVerb {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Quadratic curve: control point, end point
    QuadTo(Vec2, Vec2),
    Close,
}

/// A polyline/curve outline built mid-draw.
///
/// Components keep one pooled `Path` and build into it through
/// [`Path::scope`], which clears it when the scope ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    verbs: Vec<PathVerb>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    pub fn new() -> Self {
        Self {
            verbs: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.verbs.push(PathVerb::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        self.verbs.push(PathVerb::LineTo(p));
        self
    }

    pub fn quad_to(&mut self, control: Vec2, end: Vec2) -> &mut Self {
        self.verbs.push(PathVerb::QuadTo(control, end));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.verbs.push(PathVerb::Close);
        self
    }

    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn clear(&mut self) {
        self.verbs.clear();
    }

    /// Borrow the path for one draw; it is cleared on drop
    pub fn scope(&mut self) -> PathScope<'_> {
        self.clear();
        PathScope { path: self }
    }
}

/// Exclusive borrow of a pooled [`Path`] that clears it on drop
pub struct PathScope<'a> {
    path: &'a mut Path,
}

impl Deref for PathScope<'_> {
    type Target = Path;

    fn deref(&self) -> &Path {
        self.path
    }
}

impl DerefMut for PathScope<'_> {
    fn deref_mut(&mut self) -> &mut Path {
        self.path
    }
}

impl Drop for PathScope<'_> {
    fn drop(&mut self) {
        self.path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_clears_path() {
        let mut path = Path::new();
        {
            let mut p = path.scope();
            p.move_to(Vec2::ZERO)
                .line_to(Vec2::new(1.0, 0.0))
                .quad_to(Vec2::ONE, Vec2::new(0.0, 1.0))
                .close();
            assert_eq!(p.verbs().len(), 4);
        }
        assert!(path.is_empty());
    }

    #[test]
    fn buffer_keeps_capacity_across_scopes() {
        let mut path = Path::new();
        let cap = path.verbs.capacity();
        for _ in 0..10 {
            let mut p = path.scope();
            for i in 0..16 {
                p.line_to(Vec2::splat(i as f32));
            }
        }
        assert_eq!(path.verbs.capacity(), cap);
    }
}

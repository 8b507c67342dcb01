/// Cell payloads the pathfinder can search over.
pub trait Walkable {
    /// Whether a path may pass through this cell.
    fn walkable(&self) -> bool;
}

impl Walkable for bool {
    #[inline]
    fn walkable(&self) -> bool {
        *self
    }
}

impl<T: Walkable + ?Sized> Walkable for &T {
    #[inline]
    fn walkable(&self) -> bool {
        (**self).walkable()
    }
}

/// A point or offset in the compass' percentage space.
///
/// `x` grows to the right and `y` grows downwards, both in percent of the
/// diagram surface (0.0 ..= 100.0 for anything drawn inside it).
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same offset on both axes.
    pub fn splat(v: f64) -> Self {
        Self::new(v, v)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, s: f64) -> Self::Output {
        Self::new(self.x * s, self.y * s)
    }
}

impl std::ops::Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, s: f64) -> Self::Output {
        Self::new(self.x / s, self.y / s)
    }
}

impl std::iter::Sum for Vec2 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, v| acc + v)
    }
}

#[cfg(test)]
mod tests {
    use super::Vec2;

    #[test]
    fn vec2_add_sub() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-0.5, 4.0);
        assert_eq!(a + b, Vec2::new(0.5, 6.0));
        assert_eq!(a - b, Vec2::new(1.5, -2.0));
    }

    #[test]
    fn vec2_scale_and_sum() {
        let pts = [Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0)];
        let sum: Vec2 = pts.iter().copied().sum();
        assert_eq!(sum, Vec2::new(40.0, 60.0));
        assert_eq!(sum / 2.0, Vec2::new(20.0, 30.0));
        assert_eq!(Vec2::new(1.0, -2.0) * 3.0, Vec2::new(3.0, -6.0));
    }

    #[test]
    fn offset_by_splat() {
        let mut p = Vec2::new(45.0, 30.0);
        p += Vec2::splat(5.0);
        assert_eq!(p, Vec2::new(50.0, 35.0));
    }
}

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Picks a point uniformly from `[0, width - margin.x) × [0, height - margin.y)`.
    ///
    /// An axis whose span would be empty or negative collapses to 0.
    pub fn sample<R: Rng + ?Sized>(&self, margin: Margin, rng: &mut R) -> Point {
        Point::new(
            sample_axis(self.width - margin.x, rng),
            sample_axis(self.height - margin.y, rng),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Space reserved at the right and bottom edges so the placed element stays on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub x: f64,
    pub y: f64,
}

impl Margin {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub const POPUP_MARGIN: Margin = Margin::new(200.0, 100.0);
pub const BUTTON_MARGIN: Margin = Margin::new(100.0, 40.0);

fn sample_axis<R: Rng + ?Sized>(span: f64, rng: &mut R) -> f64 {
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_button_samples_stay_inside_span() {
        let viewport = Viewport::new(640.0, 480.0);
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..64 {
                let p = viewport.sample(BUTTON_MARGIN, &mut rng);
                assert!((0.0..540.0).contains(&p.x), "x out of range: {}", p.x);
                assert!((0.0..440.0).contains(&p.y), "y out of range: {}", p.y);
            }
        }
    }

    #[test]
    fn test_popup_samples_stay_inside_span() {
        let viewport = Viewport::new(1024.0, 768.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = viewport.sample(POPUP_MARGIN, &mut rng);
            assert!(p.x >= 0.0 && p.x < 824.0);
            assert!(p.y >= 0.0 && p.y < 668.0);
        }
    }

    #[test]
    fn test_tiny_viewport_collapses_to_origin() {
        let viewport = Viewport::new(150.0, 30.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let p = viewport.sample(POPUP_MARGIN, &mut rng);
        assert_eq!(p, Point::default());

        let p = viewport.sample(BUTTON_MARGIN, &mut rng);
        assert!(p.x >= 0.0 && p.x < 50.0);
        assert_eq!(p.y, 0.0);
    }
}

//! Tree obstacles and the scrolling field that holds them
//!
//! A tree is a top trunk hanging from the ceiling and a bottom trunk rising
//! from the floor, separated by a fixed gap. Only the height of the top
//! section varies between trees.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::tuning::Tuning;

/// A single paired top/bottom obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Left edge
    pub x: f32,
    /// Height of the top section
    pub height: f32,
    pub width: f32,
    pub gap: f32,
    /// Bottom edge of the playfield, where the lower trunk ends
    pub floor: f32,
}

impl Tree {
    pub fn new(x: f32, height: f32, width: f32, gap: f32, floor: f32) -> Self {
        Self {
            x,
            height,
            width,
            gap,
            floor,
        }
    }

    /// Scroll left by `speed` pixels
    pub fn tick(&mut self, speed: f32) {
        self.x -= speed;
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.height)
    }

    pub fn bottom_rect(&self) -> Rect {
        let start = self.bottom_start();
        Rect::new(self.x, start, self.width, self.floor - start)
    }

    /// Top of the lower trunk
    pub fn bottom_start(&self) -> f32 {
        self.height + self.gap
    }

    /// Vertical centre of the gap
    pub fn gap_center(&self) -> f32 {
        self.height + self.gap / 2.0
    }

    pub fn collides_with(&self, bounds: &Rect) -> bool {
        bounds.intersects(&self.top_rect()) || bounds.intersects(&self.bottom_rect())
    }

    /// Fully past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// The sliding window of active trees, ordered left to right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeField {
    trees: VecDeque<Tree>,
    count: usize,
    spacing: f32,
    speed: f32,
    width: f32,
    gap: f32,
    floor: f32,
    entry_x: f32,
    height_range: (u32, u32),
}

impl TreeField {
    /// Build a field already populated with its initial trees
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let mut field = Self {
            trees: VecDeque::with_capacity(tuning.tree_count.saturating_add(1)),
            count: tuning.tree_count,
            spacing: tuning.tree_spacing,
            speed: tuning.tree_speed,
            width: tuning.tree_width,
            gap: tuning.tree_gap,
            floor: tuning.screen_height,
            entry_x: tuning.screen_width,
            height_range: tuning.tree_height_range(),
        };
        field.reset(rng);
        field
    }

    /// Replace all trees with a fresh row starting at the right edge
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.trees.clear();
        for i in 0..self.count {
            self.spawn(self.entry_x + i as f32 * self.spacing, rng);
        }
    }

    /// Append a tree at `x` with a random top height
    fn spawn<R: Rng>(&mut self, x: f32, rng: &mut R) {
        let (min, max) = self.height_range;
        let height = rng.random_range(min..max) as f32;
        self.trees
            .push_back(Tree::new(x, height, self.width, self.gap, self.floor));
    }

    /// Scroll every tree, then recycle the ones that left the screen.
    ///
    /// Each recycled tree is replaced by a new one placed `spacing` after the
    /// current last tree. Returns how many trees were passed this tick.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> u32 {
        for tree in self.trees.iter_mut() {
            tree.tick(self.speed);
        }

        let before = self.trees.len();
        self.trees.retain(|tree| !tree.is_offscreen());
        let passed = before - self.trees.len();

        for _ in 0..passed {
            let x = match self.trees.back() {
                Some(last) => last.x + self.spacing,
                None => self.entry_x,
            };
            self.spawn(x, rng);
        }

        passed as u32
    }

    pub fn any_collision(&self, bounds: &Rect) -> bool {
        self.trees.iter().any(|tree| tree.collides_with(bounds))
    }

    /// First tree whose right edge is still at or past `x`
    pub fn next_ahead_of(&self, x: f32) -> Option<&Tree> {
        self.trees.iter().find(|tree| tree.x + tree.width >= x)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Mutable access for scripted scenarios
    pub fn trees_mut(&mut self) -> &mut VecDeque<Tree> {
        &mut self.trees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn tree_at(x: f32) -> Tree {
        Tree::new(x, 200.0, TREE_WIDTH, TREE_GAP, SCREEN_HEIGHT)
    }

    #[test]
    fn test_tree_geometry() {
        let tree = tree_at(500.0);
        assert_eq!(tree.top_rect(), Rect::new(500.0, 0.0, 80.0, 200.0));
        assert_eq!(tree.bottom_rect(), Rect::new(500.0, 400.0, 80.0, 200.0));
        assert_eq!(tree.gap_center(), 300.0);
    }

    #[test]
    fn test_collides_with_top_and_bottom() {
        let tree = tree_at(100.0);
        // Overlapping the top trunk
        assert!(tree.collides_with(&Rect::new(90.0, 180.0, 40.0, 20.0)));
        // Overlapping the bottom trunk
        assert!(tree.collides_with(&Rect::new(90.0, 390.0, 40.0, 20.0)));
    }

    #[test]
    fn test_no_collision_inside_gap() {
        let tree = tree_at(100.0);
        // Strictly within the gap band, horizontally overlapping
        assert!(!tree.collides_with(&Rect::new(110.0, 250.0, 40.0, 20.0)));
        // Horizontally clear of both trunks at any height
        assert!(!tree.collides_with(&Rect::new(300.0, 10.0, 40.0, 20.0)));
        assert!(!tree.collides_with(&Rect::new(300.0, 550.0, 40.0, 20.0)));
    }

    #[test]
    fn test_offscreen() {
        let mut tree = tree_at(0.0);
        assert!(!tree.is_offscreen());
        tree.x = -80.0;
        assert!(!tree.is_offscreen());
        tree.x = -81.0;
        assert!(tree.is_offscreen());
    }

    #[test]
    fn test_field_initial_layout() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = TreeField::new(&Tuning::default(), &mut rng);
        let xs: Vec<f32> = field.iter().map(|t| t.x).collect();
        assert_eq!(xs, vec![1200.0, 1500.0, 1800.0]);
        for tree in field.iter() {
            assert!(tree.height >= 50.0 && tree.height < 250.0);
            assert_eq!(tree.gap, TREE_GAP);
            assert_eq!(tree.width, TREE_WIDTH);
        }
    }

    #[test]
    fn test_field_recycles_head_after_last() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = TreeField::new(&Tuning::default(), &mut rng);
        // Put the head one step away from leaving
        field.trees_mut()[0].x = -80.0;

        let passed = field.tick(&mut rng);
        assert_eq!(passed, 1);
        assert_eq!(field.len(), TREE_COUNT);

        let xs: Vec<f32> = field.iter().map(|t| t.x).collect();
        assert_eq!(xs[0], 1497.0);
        assert_eq!(xs[1], 1797.0);
        // New tail placed relative to the (already scrolled) last tree
        assert_eq!(field.spacing(), TREE_SPACING);
        assert_eq!(xs[2], 1797.0 + field.spacing());
    }

    #[test]
    fn test_field_with_extreme_min_height() {
        let tuning = Tuning {
            tree_min_height: u32::MAX,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let field = TreeField::new(&tuning, &mut rng);
        assert_eq!(field.len(), TREE_COUNT);
        for tree in field.iter() {
            assert_eq!(tree.height, (u32::MAX - 1) as f32);
        }
    }

    #[test]
    fn test_field_counts_each_removed_tree_once() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = TreeField::new(&Tuning::default(), &mut rng);
        field.trees_mut()[0].x = -200.0;
        field.trees_mut()[1].x = -150.0;

        let passed = field.tick(&mut rng);
        assert_eq!(passed, 2);
        assert_eq!(field.len(), TREE_COUNT);

        let xs: Vec<f32> = field.iter().map(|t| t.x).collect();
        assert_eq!(xs, vec![1797.0, 2097.0, 2397.0]);

        // Nothing else leaves on the following tick
        assert_eq!(field.tick(&mut rng), 0);
    }

    #[test]
    fn test_single_tree_field_reenters_at_right_edge() {
        let tuning = Tuning {
            tree_count: 1,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = TreeField::new(&tuning, &mut rng);
        field.trees_mut()[0].x = -80.0;

        assert_eq!(field.tick(&mut rng), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.iter().next().map(|t| t.x), Some(SCREEN_WIDTH));
    }

    #[test]
    fn test_next_ahead_of() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = TreeField::new(&Tuning::default(), &mut rng);
        field.trees_mut()[0].x = 10.0;
        // Right edge at 90 is still ahead of x = 50
        assert_eq!(field.next_ahead_of(50.0).map(|t| t.x), Some(10.0));
        // ...but not ahead of x = 100
        assert_eq!(field.next_ahead_of(100.0).map(|t| t.x), Some(1500.0));
    }
}

//! Random cover image selection.

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a cover uniformly at random; `None` for an empty list.
pub fn pick_cover(images: &[String]) -> Option<String> {
    pick_cover_with(images, &mut rand::thread_rng())
}

pub fn pick_cover_with<R: Rng + ?Sized>(images: &[String], rng: &mut R) -> Option<String> {
    images.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn picks_from_the_list() {
        let images = vec!["/a.png".to_string(), "/b.png".to_string()];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let cover = pick_cover_with(&images, &mut rng).unwrap();
            assert!(images.contains(&cover));
        }
    }

    #[test]
    fn empty_list_has_no_cover() {
        assert_eq!(pick_cover(&[]), None);
    }
}

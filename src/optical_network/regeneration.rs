use super::error::{Result, SpectrumError};
use super::fiber::DistanceKM;
use super::ids::FiberId;

pub trait FiberLength {
    fn fiber_id(&self) -> FiberId;
    fn length_km(&self) -> DistanceKM;
}

/// Splits `path` into consecutive segments whose summed length stays within `budget_km`.
///
/// Greedy, left to right: a fiber joins the current segment while the total still fits,
/// otherwise it opens the next segment. Regenerators sit between segments.
/// Concatenating the result gives back `path`. An empty path gives no segments.
pub fn regeneration_segments<T>(path:&[T],budget_km:DistanceKM) -> Result<Vec<Vec<T>>>
    where T:FiberLength + Clone
{
    if !budget_km.is_finite() || budget_km < 0.0 {
        return Err(SpectrumError::InvalidBudget{budget_km})
    }
    if let Some(too_long) = path.iter().find(|fiber| fiber.length_km() > budget_km) {
        return Err(SpectrumError::FiberExceedsReach {
            fiber:too_long.fiber_id(),
            length_km:too_long.length_km(),
            budget_km
        })
    }

    let mut segments = Vec::new();
    let mut current:Vec<T> = Vec::new();
    let mut current_km = 0.0;
    for fiber in path {
        let length = fiber.length_km();
        if current_km + length <= budget_km {
            current.push(fiber.clone());
            current_km += length;
        }else{
            segments.push(std::mem::take(&mut current));
            current.push(fiber.clone());
            current_km = length;
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{regeneration_segments, FiberLength};
    use crate::optical_network::error::{ErrorKind, SpectrumError};
    use crate::optical_network::fiber::Fiber;
    use crate::optical_network::ids::FiberId;
    use crate::optical_network::slots::ValidSlotSet;

    #[derive(Clone,Debug,PartialEq)]
    struct Span(u64,f64);

    impl FiberLength for Span {
        fn fiber_id(&self) -> FiberId {
            FiberId(self.0)
        }
        fn length_km(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn test_greedy_segments() {
        let path = [Span(1,40.0),Span(2,50.0),Span(3,30.0),Span(4,80.0),Span(5,20.0)];
        let segments = regeneration_segments(&path,100.0).unwrap();
        assert_eq!(segments,vec![
            vec![Span(1,40.0),Span(2,50.0)],
            vec![Span(3,30.0)],
            vec![Span(4,80.0),Span(5,20.0)],
        ]);
    }
    #[test]
    fn test_empty_path() {
        let path:[Span;0] = [];
        assert!(regeneration_segments(&path,100.0).unwrap().is_empty());
    }
    #[test]
    fn test_over_budget_fiber() {
        let fibers = [
            Fiber::new(FiberId(1),ValidSlotSet::new(),60.0).unwrap(),
            Fiber::new(FiberId(2),ValidSlotSet::new(),160.0).unwrap(),
        ];
        let err = regeneration_segments(&fibers,100.0).unwrap_err();
        assert_eq!(err,SpectrumError::FiberExceedsReach{fiber:FiberId(2),length_km:160.0,budget_km:100.0});
        assert_eq!(err.kind(),ErrorKind::UnsatisfiableAllocation);
    }
    #[test]
    fn test_invalid_budget() {
        let path = [Span(1,1.0)];
        assert!(matches!(regeneration_segments(&path,f64::NAN),Err(SpectrumError::InvalidBudget{..})));
        assert!(matches!(regeneration_segments(&path,-5.0),Err(SpectrumError::InvalidBudget{..})));
    }
    #[test]
    fn test_random_coverage() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let budget = rng.random_range(50.0..500.0);
            let path:Vec<Span> = (0..rng.random_range(0..40u64))
                .map(|id| Span(id,rng.random_range(0.0..budget)))
                .collect();
            let segments = regeneration_segments(&path,budget).unwrap();
            let flat:Vec<Span> = segments.iter().flatten().cloned().collect();
            assert_eq!(flat,path);
            for segment in segments.iter() {
                assert!(!segment.is_empty());
                assert!(segment.iter().map(|s| s.1).sum::<f64>() <= budget);
            }
            // greedy: the next segment's first fiber would not have fit
            for pair in segments.windows(2) {
                let total:f64 = pair[0].iter().map(|s| s.1).sum();
                assert!(total + pair[1][0].1 > budget);
            }
        }
    }
}

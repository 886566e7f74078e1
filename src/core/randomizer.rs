use crate::domain::model::Comparison;
use crate::domain::ports::QuestionRandomizer;
use rand::{thread_rng, Rng};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomizer;

impl QuestionRandomizer for ThreadRandomizer {
    fn index(&self, len: usize) -> usize {
        thread_rng().gen_range(0..len)
    }

    fn threshold(&self, range: RangeInclusive<u8>) -> u8 {
        thread_rng().gen_range(range)
    }

    fn comparison(&self) -> Comparison {
        if thread_rng().gen_bool(0.5) {
            Comparison::GreaterThan
        } else {
            Comparison::LessThan
        }
    }
}

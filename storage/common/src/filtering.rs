use keyql::ast::{OrderByItem, Predicate};
use keyseek_core::selection::filter::{evaluate_predicate, Filterable};

use crate::sorting::{LimitedStream, SortedStream, TopKStream};

/// Stream of items that can provide values for filtering, sorting and limiting.
pub trait ValueSetStream: Iterator + Sized
where Self::Item: Filterable
{
    fn filter_predicate(self, predicate: &Predicate) -> FilteredStream<Self> { FilteredStream::new(self, predicate.clone()) }

    /// Sort all items (mutually exclusive with top_k)
    fn sort_by(self, order_by: &[OrderByItem]) -> SortedStream<Self> { SortedStream::new(self, order_by.to_vec()) }

    fn limit(self, limit: Option<u64>) -> LimitedStream<Self> { LimitedStream::new(self, limit) }

    /// Sort and limit together
    fn top_k(self, order_by: &[OrderByItem], k: usize) -> TopKStream<Self> { TopKStream::new(self, order_by.to_vec(), k) }
}

/// Passes through items matching a predicate.
pub struct FilteredStream<I> {
    inner: I,
    predicate: Predicate,
}

impl<I> FilteredStream<I> {
    pub fn new(inner: I, predicate: Predicate) -> Self { Self { inner, predicate } }
}

impl<I> Iterator for FilteredStream<I>
where
    I: Iterator,
    I::Item: Filterable,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &self.predicate;
        self.inner.by_ref().find(|item| evaluate_predicate(item, predicate))
    }
}

impl<I> ValueSetStream for I
where
    I: Iterator,
    I::Item: Filterable,
{
}

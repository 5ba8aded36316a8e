use keyql::ast::OrderByItem;
use keyseek_core::collation::collate_directed;
use keyseek_core::selection::filter::Filterable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Compare two items under ORDER BY clauses. Missing values take the null sentinel position:
/// first when ascending, last when descending.
pub fn compare_items<T: Filterable>(a: &T, b: &T, order_by: &[OrderByItem]) -> Ordering {
    for item in order_by {
        let name = item.identifier.name();
        let cmp = collate_directed(a.value(name).as_ref(), b.value(name).as_ref(), item.direction);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }
    Ordering::Equal
}

fn collect_and_sort<I>(inner: I, order_by: &[OrderByItem]) -> Vec<I::Item>
where
    I: Iterator,
    I::Item: Filterable,
{
    let mut items: Vec<_> = inner.collect();
    items.sort_by(|a, b| compare_items(a, b, order_by));
    items
}

/// Keep the first `k` items in order using a bounded max-heap whose top is the worst kept item.
fn collect_top_k<I>(inner: I, order_by: &[OrderByItem], k: usize) -> Vec<I::Item>
where
    I: Iterator,
    I::Item: Filterable,
{
    if k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<HeapItem<'_, I::Item>> = BinaryHeap::with_capacity(k + 1);
    for item in inner {
        let candidate = HeapItem { item, order_by };
        if heap.len() < k {
            heap.push(candidate);
        } else if heap.peek().is_some_and(|worst| candidate < *worst) {
            heap.pop();
            heap.push(candidate);
        }
    }
    heap.into_sorted_vec().into_iter().map(|h| h.item).collect()
}

/// Collects all items, sorts them, then iterates.
pub struct SortedStream<I>
where I: Iterator
{
    inner: Option<I>,
    order_by: Vec<OrderByItem>,
    sorted_items: Option<std::vec::IntoIter<I::Item>>,
}

impl<I> SortedStream<I>
where I: Iterator
{
    pub fn new(inner: I, order_by: Vec<OrderByItem>) -> Self { Self { inner: Some(inner), order_by, sorted_items: None } }
}

impl<I> Iterator for SortedStream<I>
where
    I: Iterator,
    I::Item: Filterable,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sorted_items.is_none() {
            if let Some(inner) = self.inner.take() {
                self.sorted_items = Some(collect_and_sort(inner, &self.order_by).into_iter());
            }
        }
        self.sorted_items.as_mut()?.next()
    }
}

/// Terminates after N items.
pub struct LimitedStream<I> {
    inner: I,
    limit: Option<u64>,
    count: u64,
}

impl<I> LimitedStream<I> {
    pub fn new(inner: I, limit: Option<u64>) -> Self { Self { inner, limit, count: 0 } }
}

impl<I> Iterator for LimitedStream<I>
where I: Iterator
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.limit.is_some_and(|limit| self.count >= limit) {
            return None;
        }
        let item = self.inner.next()?;
        self.count += 1;
        Some(item)
    }
}

struct HeapItem<'a, T> {
    item: T,
    order_by: &'a [OrderByItem],
}

impl<T: Filterable> PartialEq for HeapItem<'_, T> {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl<T: Filterable> Eq for HeapItem<'_, T> {}

impl<T: Filterable> PartialOrd for HeapItem<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl<T: Filterable> Ord for HeapItem<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering { compare_items(&self.item, &other.item, self.order_by) }
}

/// Sort and limit in one pass, holding at most `k` items.
pub struct TopKStream<I>
where I: Iterator
{
    inner: Option<I>,
    order_by: Vec<OrderByItem>,
    k: usize,
    top_k_items: Option<std::vec::IntoIter<I::Item>>,
}

impl<I> TopKStream<I>
where I: Iterator
{
    pub fn new(inner: I, order_by: Vec<OrderByItem>, k: usize) -> Self { Self { inner: Some(inner), order_by, k, top_k_items: None } }
}

impl<I> Iterator for TopKStream<I>
where
    I: Iterator,
    I::Item: Filterable,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.top_k_items.is_none() {
            if let Some(inner) = self.inner.take() {
                self.top_k_items = Some(collect_top_k(inner, &self.order_by, self.k).into_iter());
            }
        }
        self.top_k_items.as_mut()?.next()
    }
}

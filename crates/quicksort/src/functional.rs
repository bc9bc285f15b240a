use crate::partition;
use crate::pivot::PivotPolicy;

enum Task<T> {
    Sort(Vec<T>),
    Emit(T),
}

/// Returns a sorted copy of `input`, which is left untouched.
pub fn quick_sort<T, P>(input: &[T], policy: &mut P) -> Vec<T>
where
    T: Ord + Clone,
    P: PivotPolicy + ?Sized,
{
    if input.len() <= 1 {
        return input.to_vec();
    }

    // Left-first expansion keeps pivot draws in recursive order.
    let mut out = Vec::with_capacity(input.len());
    let mut tasks = vec![Task::Sort(input.to_vec())];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Emit(x) => out.push(x),
            Task::Sort(group) if group.len() <= 1 => out.extend(group),
            Task::Sort(group) => {
                let pivot_index = policy.select(group.len());
                let (left, pivot, right) = partition::split_around(group, pivot_index);
                if !right.is_empty() {
                    tasks.push(Task::Sort(right));
                }
                tasks.push(Task::Emit(pivot));
                if !left.is_empty() {
                    tasks.push(Task::Sort(left));
                }
            }
        }
    }

    debug_assert_eq!(out.len(), input.len());
    out
}

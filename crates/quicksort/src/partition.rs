/// Removes the pivot and splits the rest into `< pivot` and `>= pivot`, keeping input order.
pub fn split_around<T: Ord>(mut group: Vec<T>, pivot_index: usize) -> (Vec<T>, T, Vec<T>) {
    let pivot = group.remove(pivot_index);
    let mut left = Vec::new();
    let mut right = Vec::new();

    for x in group {
        if x < pivot {
            left.push(x);
        } else {
            right.push(x);
        }
    }

    (left, pivot, right)
}

/// Partitions around `data[0]` and returns its final index.
///
/// Forward skips `<= pivot`, backward skips `> pivot`; this asymmetry keeps
/// both cursors in bounds and makes progress on runs of equal keys.
pub fn partition_first_pivot<T: Ord>(data: &mut [T]) -> usize {
    let len = data.len();
    if len < 2 {
        return 0;
    }

    // `j` only moves while `i <= j` and `i >= 1`, so it cannot underflow and
    // the pivot slot is untouched until the final swap.
    let mut i = 1usize;
    let mut j = len - 1;

    loop {
        while i <= j && data[i] <= data[0] {
            i += 1;
        }
        while i <= j && data[j] > data[0] {
            j -= 1;
        }
        if i <= j {
            data.swap(i, j);
            i += 1;
            j -= 1;
        } else {
            break;
        }
    }

    data.swap(0, j);
    j
}

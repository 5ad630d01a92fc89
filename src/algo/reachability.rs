//! Warshall transitive closure.

use crate::model::Matrix;

/// Plain Warshall closure: `closure[i][j]` is true iff a directed path of
/// length >= 1 leads from i to j. The diagonal is only set for places that
/// lie on a cycle.
pub fn transitive_closure(adjacency: &Matrix<bool>) -> Matrix<bool> {
    let mut closure = adjacency.clone();
    warshall(&mut closure);
    closure
}

/// Reflexive-transitive closure: every place reaches itself, plus every
/// pair joined by a directed path. This is the relation the facade answers
/// connectivity queries with.
pub fn reachability_closure(adjacency: &Matrix<bool>) -> Matrix<bool> {
    let mut closure = adjacency.clone();
    for i in 0..closure.dim() {
        closure.set(i, i, true);
    }
    warshall(&mut closure);
    closure
}

fn warshall(closure: &mut Matrix<bool>) {
    let n = closure.dim();
    for k in 0..n {
        for i in 0..n {
            if !closure[(i, k)] {
                continue;
            }
            for j in 0..n {
                if closure[(k, j)] {
                    closure.set(i, j, true);
                }
            }
        }
    }
}

use std::collections::HashSet;

/// A membership mutation request over normalized device ids. `set` is
/// authoritative when present; `add`/`remove` are ignored in that case.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MembershipRequest {
    pub add: Option<Vec<i64>>,
    pub remove: Option<Vec<i64>>,
    pub set: Option<Vec<i64>>,
}

impl MembershipRequest {
    /// A request without any of add/remove/set is a no-op and must not touch
    /// the database at all.
    pub fn is_empty(&self) -> bool {
        self.add.is_none() && self.remove.is_none() && self.set.is_none()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MembershipDiff {
    pub to_add: Vec<i64>,
    pub to_remove: Vec<i64>,
}

impl MembershipDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Computes the minimal set of add/remove mutations for a group given its
/// current membership snapshot. Pure function, no database access.
pub fn compute_diff(current: &HashSet<i64>, request: &MembershipRequest) -> MembershipDiff {
    if let Some(target) = &request.set {
        let target: HashSet<i64> = target.iter().copied().collect();
        let to_add = target.difference(current).copied().collect();
        let to_remove = current.difference(&target).copied().collect();
        return sorted(to_add, to_remove);
    }

    let add: HashSet<i64> = request
        .add
        .as_deref()
        .unwrap_or_default()
        .iter()
        .copied()
        .collect();
    let remove: HashSet<i64> = request
        .remove
        .as_deref()
        .unwrap_or_default()
        .iter()
        .copied()
        .collect();

    let to_add: HashSet<i64> = add.difference(current).copied().collect();
    // A device named in both lists is added first and removed afterwards
    // inside the same transaction, so the operation nets to removal. Devices
    // that are neither current members nor being added cause no write.
    let to_remove = remove
        .iter()
        .filter(|id| current.contains(*id) || to_add.contains(*id))
        .copied()
        .collect();

    sorted(to_add, to_remove)
}

fn sorted(to_add: HashSet<i64>, to_remove: HashSet<i64>) -> MembershipDiff {
    let mut to_add: Vec<i64> = to_add.into_iter().collect();
    let mut to_remove: Vec<i64> = to_remove.into_iter().collect();
    to_add.sort_unstable();
    to_remove.sort_unstable();
    MembershipDiff { to_add, to_remove }
}

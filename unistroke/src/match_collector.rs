use super::Match;

// Keeps the best `max` matches, one per name, sorted by descending score.
pub struct MatchCollector<C> {
    max: usize,
    matches: Vec<Match<C>>,
}

impl<C> MatchCollector<C> {
    pub fn new(max: usize) -> MatchCollector<C> {
        MatchCollector {
            max: max,
            matches: Vec::with_capacity(max),
        }
    }

    fn remove_existing_lower(&mut self, mc: &Match<C>) -> bool {
        let ix = match self.matches.iter().position(|x| x.name == mc.name) {
            Some(ix) => ix,
            // Not there yet: match doesn't need to be skipped
            None => return false,
        };
        // New score is not better: skip new match
        if mc.score <= self.matches[ix].score {
            return true;
        }
        self.matches.remove(ix);
        false
    }

    pub fn file_match(&mut self, mc: Match<C>) {
        if self.max == 0 {
            return;
        }
        // Already at limit: don't bother if new match's score is not above current minimum
        if self.matches.len() == self.max {
            if let Some(last) = self.matches.last() {
                if mc.score <= last.score {
                    return;
                }
            }
        }
        if self.remove_existing_lower(&mc) {
            return;
        }
        // Equal scores stay behind the ones filed earlier
        match self.matches.iter().position(|x| x.score < mc.score) {
            Some(ix) => self.matches.insert(ix, mc),
            None => self.matches.push(mc),
        }
        if self.matches.len() > self.max {
            self.matches.pop();
        }
    }

    pub fn into_matches(self) -> Vec<Match<C>> {
        self.matches
    }
}

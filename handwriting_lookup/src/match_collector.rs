use super::MatchResult;

// Keeps the best matches seen so far, cheapest first, up to a fixed count
pub struct MatchCollector<'a> {
    max: usize,
    matches: Vec<MatchResult<'a>>,
}

impl<'a> MatchCollector<'a> {
    pub fn new(max: usize) -> MatchCollector<'a> {
        assert!(max > 0, "Expected a positive number for the maximum number of matches.");
        MatchCollector {
            max: max,
            matches: Vec::new(),
        }
    }

    pub fn file_match(&mut self, mc: MatchResult<'a>) {
        // Already at limit: don't bother unless new match beats the current worst
        if self.matches.len() == self.max {
            if let Some(worst) = self.matches.last() {
                if mc.cost >= worst.cost {
                    return;
                }
            }
        }
        // Where does new match go? Equal costs keep the one filed first ahead.
        let ix = self.matches.iter().position(|x| x.cost > mc.cost);
        match ix {
            Some(ix) => self.matches.insert(ix, mc),
            None => self.matches.push(mc),
        }
        // Beyond limit? Drop last item.
        if self.matches.len() > self.max {
            self.matches.pop();
        }
    }

    pub fn best(&self) -> Option<&MatchResult<'a>> {
        self.matches.first()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_matches(self) -> Vec<MatchResult<'a>> {
        self.matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CharacterTemplate;

    #[test]
    #[should_panic]
    fn test_new_fail() {
        let _collector = MatchCollector::new(0);
    }

    #[test]
    fn test_unbounded_limit() {
        let a = CharacterTemplate::parse("A", "8").unwrap();
        let mut collector = MatchCollector::new(usize::MAX);
        collector.file_match(MatchResult { template: &a, cost: 10.0 });
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_filing() {
        let a = CharacterTemplate::parse("A", "8").unwrap();
        let b = CharacterTemplate::parse("B", "4").unwrap();
        let c = CharacterTemplate::parse("C", "0").unwrap();
        let d = CharacterTemplate::parse("D", "C").unwrap();
        let e = CharacterTemplate::parse("E", "6").unwrap();

        let mut collector = MatchCollector::new(3);
        assert!(collector.best().is_none());
        collector.file_match(MatchResult { template: &a, cost: 300.0 });
        collector.file_match(MatchResult { template: &b, cost: 100.0 });
        collector.file_match(MatchResult { template: &c, cost: 200.0 });
        // Ties with an entry already filed go behind it
        collector.file_match(MatchResult { template: &d, cost: 100.0 });
        // Not better than the current worst at the limit
        collector.file_match(MatchResult { template: &e, cost: 200.0 });
        assert_eq!(collector.len(), 3);
        assert_eq!(collector.best().map(|m| m.template.name()), Some("B"));

        let names: Vec<&str> = collector.into_matches().iter().map(|m| m.template.name()).collect();
        assert_eq!(names, ["B", "D", "C"]);
    }
}

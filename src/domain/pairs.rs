use crate::domain::model::{Port, PortPair};

/// 依目錄順序列舉跨國港口組合 (i < j)。
///
/// 迭代器只借用目錄，不持有狀態以外的資料；對同一份目錄重新呼叫
/// [`cross_country_pairs`] 會得到相同順序。
#[derive(Debug, Clone)]
pub struct PairGenerator<'a> {
    ports: &'a [Port],
    i: usize,
    j: usize,
    emitted: usize,
}

pub fn cross_country_pairs(ports: &[Port]) -> PairGenerator<'_> {
    PairGenerator {
        ports,
        i: 0,
        j: 1,
        emitted: 0,
    }
}

impl<'a> Iterator for PairGenerator<'a> {
    type Item = PortPair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.ports.len() {
            if self.j >= self.ports.len() {
                self.i += 1;
                self.j = self.i + 1;
                continue;
            }

            let origin = &self.ports[self.i];
            let destination = &self.ports[self.j];
            self.j += 1;

            if origin.country != destination.country {
                let pair = PortPair {
                    index: self.emitted,
                    origin,
                    destination,
                };
                self.emitted += 1;
                return Some(pair);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Coordinates;

    fn port(code: &str, country: &str) -> Port {
        Port {
            unlocode: code.to_string(),
            name: code.to_string(),
            country: country.to_string(),
            coordinates: Coordinates::new(0.0, 0.0),
        }
    }

    fn codes(ports: &[Port]) -> Vec<(String, String)> {
        cross_country_pairs(ports)
            .map(|p| (p.origin.unlocode.clone(), p.destination.unlocode.clone()))
            .collect()
    }

    #[test]
    fn test_enumerates_in_catalog_order() {
        let ports = vec![port("A", "SG"), port("B", "MY"), port("C", "ID")];

        assert_eq!(
            codes(&ports),
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn test_skips_same_country_pairs() {
        let ports = vec![
            port("SGSIN", "SG"),
            port("SGJUR", "SG"),
            port("MYPKG", "MY"),
        ];

        let pairs = codes(&ports);
        assert_eq!(pairs.len(), 2);
        assert!(!pairs.contains(&("SGSIN".to_string(), "SGJUR".to_string())));
        for pair in cross_country_pairs(&ports) {
            assert_ne!(pair.origin.country, pair.destination.country);
        }
    }

    #[test]
    fn test_indices_are_sequential() {
        let ports = vec![port("A", "SG"), port("B", "SG"), port("C", "MY"), port("D", "ID")];
        let indices: Vec<usize> = cross_country_pairs(&ports).map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_restartable() {
        let ports = vec![port("A", "SG"), port("B", "MY"), port("C", "SG"), port("D", "ID")];
        assert_eq!(codes(&ports), codes(&ports));
    }

    #[test]
    fn test_empty_and_single_catalog() {
        assert_eq!(cross_country_pairs(&[]).count(), 0);
        assert_eq!(cross_country_pairs(&[port("A", "SG")]).count(), 0);
    }

    #[test]
    fn test_no_reversed_duplicates() {
        let ports = vec![port("A", "SG"), port("B", "MY"), port("C", "ID"), port("D", "TH")];
        let pairs = codes(&ports);
        for (origin, destination) in &pairs {
            assert!(!pairs.contains(&(destination.clone(), origin.clone())));
        }
        assert_eq!(pairs.len(), 6);
    }
}

#[cfg(test)]
mod tests {
    use chordmatch_core::catalog::ChordEntry;
    use chordmatch_core::engine::MatchResult;
    use chordmatch_core::{standard_catalog, Catalog, CombinationIndex, Key, Matcher, Query};
    use std::sync::Arc;
    use std::thread;

    fn matcher() -> Matcher {
        Matcher::new(standard_catalog().unwrap())
    }

    fn queries() -> Vec<Vec<&'static str>> {
        vec![
            vec!["C", "E", "G"],
            vec!["C", "E", "A"],
            vec!["G", "B", "D", "F"],
            vec!["Ab", "C", "Eb", "F#"],
            vec!["D", "F#"],
            vec!["C", "D", "E", "F", "G", "A", "B"],
            vec!["E", "G#", "B", "-"],
        ]
    }

    fn assert_ranked(results: &[MatchResult]) {
        for pair in results.windows(2) {
            assert!(
                pair[0].score >= pair[1].score,
                "{} ({}) ranked above {} ({})",
                pair[0].identity,
                pair[0].score,
                pair[1].identity,
                pair[1].score
            );
        }
    }

    #[test]
    fn test_c_major_triad_scenario() {
        let results = matcher()
            .match_notes(&["C", "E", "G"], &Query::new().with_threshold(3))
            .unwrap();

        let position = results
            .iter()
            .position(|r| r.identity == "CMajorI")
            .expect("CMajorI should be returned");
        assert_eq!(position, 0);

        let top = &results[position];
        assert_eq!(top.pitch_matches, 3);
        assert_eq!(top.name_matches, 3);
        assert!(top.root_present);
        assert_eq!(top.edit_distance, 0);
        assert!(top.length_match);
    }

    #[test]
    fn test_key_filter_excludes_minor_keys() {
        let key: Key = "CMajor".parse().unwrap();
        let results = matcher()
            .match_notes(&["C", "E", "A"], &Query::new().with_key(key).with_num_out(50))
            .unwrap();

        assert!(!results.is_empty());
        for result in &results {
            assert!(result.key.is_major(), "{}", result.identity);
            assert_eq!(result.key.normalized(), "CMAJOR");
        }
        assert_eq!(results[0].identity, "CMajorVI");
    }

    #[test]
    fn test_weighted_prefers_heavier_triad() {
        let notes = [("C", 0.3), ("E", 0.3), ("G", 0.3), ("B", 0.1)];
        let results = matcher()
            .match_weighted(&notes, &Query::new().with_num_out(500))
            .unwrap();

        let rank_of = |id: &str| results.iter().position(|r| r.identity == id).unwrap();
        // G B D shares one heavy note and the light B
        assert!(rank_of("CMajorI") < rank_of("GMajorI"));
        assert_ranked(&results);
    }

    #[test]
    fn test_weighted_key_filter_and_cap() {
        let matcher = matcher();
        let notes = [("G", 0.4), ("B", 0.2), ("D", 0.3), ("F", 0.1)];
        for key in matcher.catalog().keys() {
            for num_out in [1, 3, 100] {
                let query = Query::new().with_key(key).with_num_out(num_out);
                let results = matcher.match_weighted(&notes, &query).unwrap();
                assert!(results.len() <= num_out);
                assert!(results.iter().all(|r| r.key.normalized() == key.normalized()));
                assert!(results.iter().all(|r| r.root_first.is_some()));
                assert_ranked(&results);
            }
        }

        let c_major: Key = "CMajor".parse().unwrap();
        let results = matcher
            .match_weighted(&notes, &Query::new().with_key(c_major).with_threshold(3))
            .unwrap();
        // V (G B D) and VII (B D F) each share three notes
        assert!(results.iter().any(|r| r.identity == "CMajorV"));
        assert!(results.iter().all(|r| r.pitch_matches >= 3));
    }

    #[test]
    fn test_equal_scores_rank_later_identity_first() {
        let results = matcher()
            .match_notes(&["E", "G", "B"], &Query::new().with_num_out(40))
            .unwrap();
        let rank_of = |id: &str| results.iter().position(|r| r.identity == id).unwrap();

        assert_eq!(results[rank_of("GMajorVI")].score, results[rank_of("DMajorII")].score);
        assert!(rank_of("GMajorVI") < rank_of("DMajorII"));
        assert_eq!(results[rank_of("bMinorIV")].score, results[rank_of("aMinorV")].score);
        assert!(rank_of("bMinorIV") < rank_of("aMinorV"));

        for pair in results.windows(2) {
            if pair[0].score == pair[1].score {
                assert!(pair[0].identity > pair[1].identity);
            }
        }
    }

    #[test]
    fn test_results_are_deterministic() {
        let matcher = matcher();
        for notes in queries() {
            let first = matcher.match_notes(&notes, &Query::new()).unwrap();
            let second = matcher.match_notes(&notes, &Query::new()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_ranking_and_cap() {
        let matcher = matcher();
        for notes in queries() {
            for num_out in [0, 1, 5, 10, 1000] {
                let results = matcher
                    .match_notes(&notes, &Query::new().with_num_out(num_out))
                    .unwrap();
                assert!(results.len() <= num_out);
                assert_ranked(&results);
            }
        }
    }

    #[test]
    fn test_subset_soundness() {
        let matcher = matcher();
        for notes in queries() {
            for threshold in 2..=4 {
                let results = matcher
                    .match_notes(&notes, &Query::new().with_threshold(threshold).with_num_out(1000))
                    .unwrap();
                for result in results {
                    assert!(
                        result.pitch_matches >= threshold,
                        "{} surfaced with {} shared pitch classes",
                        result.identity,
                        result.pitch_matches
                    );
                }
            }
        }
    }

    #[test]
    fn test_fewer_notes_than_threshold_is_empty() {
        let matcher = matcher();
        let results = matcher
            .match_notes(&["C", "G"], &Query::new().with_threshold(3))
            .unwrap();
        assert!(results.is_empty());

        let single = matcher.match_notes(&["C"], &Query::new()).unwrap();
        assert!(single.is_empty());

        let nothing: [&str; 0] = [];
        assert!(matcher.match_notes(&nothing, &Query::new()).unwrap().is_empty());
    }

    #[test]
    fn test_key_filter_for_every_key() {
        let matcher = matcher();
        let keys = matcher.catalog().keys();
        for key in keys {
            let results = matcher
                .match_notes(&["C", "E", "G", "Bb"], &Query::new().with_key(key).with_num_out(100))
                .unwrap();
            assert!(results.iter().all(|r| r.key.normalized() == key.normalized()));
        }
    }

    #[test]
    fn test_prebuilt_index_matches_built_index() {
        let catalog = standard_catalog().unwrap();
        let index = CombinationIndex::build(&catalog);
        let json = index.to_json().unwrap();

        let loaded = Matcher::with_index(catalog.clone(), CombinationIndex::from_json(&json).unwrap());
        loaded.validate().unwrap();

        let built = Matcher::new(catalog);
        for notes in queries() {
            assert_eq!(
                loaded.match_notes(&notes, &Query::new()).unwrap(),
                built.match_notes(&notes, &Query::new()).unwrap()
            );
        }
    }

    #[test]
    fn test_catalog_file_round_trip() {
        let catalog = standard_catalog().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, catalog.to_json().unwrap()).unwrap();

        let loaded = Catalog::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.len(), catalog.len());
        assert_eq!(loaded.get("EbMajorV").unwrap().pitch_classes(), &[10, 2, 5]);
    }

    #[test]
    fn test_synthetic_catalog() {
        let key: Key = "DMajor".parse().unwrap();
        let power = ChordEntry::new(
            "DMajorI",
            key,
            "I".parse().unwrap(),
            vec![2, 9],
            vec!["D".parse().unwrap(), "A".parse().unwrap()],
        )
        .unwrap();
        let matcher = Matcher::new(Catalog::from_entries(vec![power]).unwrap());

        let results = matcher.match_notes(&["D", "A"], &Query::new()).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].length_match);
        // 2000 + 200 + 500 + 60 / (0 + 1) + 4
        assert_eq!(results[0].score, 2764.0);
    }

    #[test]
    fn test_concurrent_queries_share_one_matcher() {
        let matcher = Arc::new(matcher());
        let expected = matcher.match_notes(&["G", "B", "D", "F"], &Query::new()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let matcher = Arc::clone(&matcher);
                thread::spawn(move || matcher.match_notes(&["G", "B", "D", "F"], &Query::new()).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}

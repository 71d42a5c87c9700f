#[cfg(test)]
mod tests {
    use crate::registry::{Registry, Rejection};
    use crate::models::{Principal, Proposal, Vote};
    use crate::error::{Error, ErrorCode};
    use crate::validation::*;
    use crate::models::{CreateProposalRequest, RegisterCandidateRequest, RegisterUserRequest};
    use crate::caller::{generate_server_fingerprint, resolve_principal};

    fn principal(id: &str) -> Principal {
        Principal::new(id)
    }

    fn registry_with(users: &[&str]) -> Registry {
        let mut r = Registry::new();
        users.iter().for_each(|u| assert!(r.register_user(&principal(u), *u)));
        r
    }

    fn assert_counts_consistent(r: &Registry) {
        for p in r.list_proposals() {
            assert_eq!(r.get_vote_count(p.id), r.votes_for_proposal(p.id), "proposal {}", p.id);
        }
    }

    #[test]
    fn test_register_user_once() {
        let mut r = Registry::new();
        let alice = principal("alice");
        assert!(r.register_user(&alice, "Alice"));
        assert!(!r.register_user(&alice, "Mallory"));

        let user = r.get_user(&alice).unwrap();
        assert_eq!(user.name, "Alice");
        assert!(user.registered);
        assert!(r.get_user(&principal("bob")).is_none());
        assert!(matches!(r.try_register_user(&alice, "Again"), Err(Rejection::AlreadyRegistered)));
    }

    #[test]
    fn test_proposal_ids_are_sequential() {
        let mut r = registry_with(&["alice"]);
        let alice = principal("alice");
        let ids: Vec<_> = (0..5)
            .map(|i| r.create_proposal(&alice, format!("proposal {}", i)).unwrap())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);

        let listed: Vec<_> = r.list_proposals().map(|p| p.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_candidate_ids_independent_of_proposals() {
        let mut r = registry_with(&["alice", "bob"]);
        let (alice, bob) = (principal("alice"), principal("bob"));

        assert_eq!(r.create_proposal(&alice, "p"), Some(0));
        assert_eq!(r.register_candidate(&alice, "Alice", "Parks for all"), Some(0));
        assert_eq!(r.register_candidate(&bob, "Bob", "Fewer parks"), Some(1));

        let candidate = r.get_candidate(1).unwrap();
        assert_eq!(candidate.name, "Bob");
        assert_eq!(candidate.manifesto, "Fewer parks");
        assert!(r.get_candidate(2).is_none());

        let names: Vec<_> = r.list_candidates().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_vote_once_per_proposal() {
        let mut r = registry_with(&["alice"]);
        let alice = principal("alice");
        let id = r.create_proposal(&alice, "Build a park").unwrap();

        assert!(r.cast_vote(&alice, id));
        assert!(!r.cast_vote(&alice, id));
        assert_eq!(r.get_vote_count(id), 1);
        assert!(matches!(r.try_cast_vote(&alice, id), Err(Rejection::AlreadyVoted(0))));
        assert_counts_consistent(&r);
    }

    #[test]
    fn test_unregistered_caller_rejected() {
        let mut r = registry_with(&["alice"]);
        let id = r.create_proposal(&principal("alice"), "p").unwrap();
        let eve = principal("eve");

        assert_eq!(r.create_proposal(&eve, "sneaky"), None);
        assert_eq!(r.register_candidate(&eve, "Eve", "..."), None);
        assert!(!r.cast_vote(&eve, id));
        assert!(matches!(r.try_cast_vote(&eve, id), Err(Rejection::NotRegistered)));

        assert_eq!(r.get_vote_count(id), 0);
        assert!(r.get_user_votes(&eve).is_empty());
        assert_eq!(r.list_proposals().count(), 1);
        assert_eq!(r.list_candidates().count(), 0);
    }

    #[test]
    fn test_unknown_proposal_rejected() {
        let mut r = registry_with(&["alice"]);
        let alice = principal("alice");
        assert!(!r.cast_vote(&alice, 9999));
        assert!(matches!(r.try_cast_vote(&alice, 9999), Err(Rejection::UnknownProposal(9999))));
        assert_eq!(r.get_vote_count(9999), 0);
        assert!(r.get_proposal(9999).is_none());
        assert!(r.get_user_votes(&alice).is_empty());
    }

    #[test]
    fn test_park_scenario() {
        let mut r = Registry::new();
        let alice = principal("alice");
        assert!(r.register_user(&alice, "alice"));
        assert_eq!(r.create_proposal(&alice, "Build a park"), Some(0));
        assert!(r.cast_vote(&alice, 0));
        assert_eq!(r.get_proposal(0), Some(&Proposal { id: 0, description: "Build a park".into(), votes: 1 }));
        assert!(!r.cast_vote(&alice, 0));
        assert_eq!(r.get_vote_count(0), 1);
        assert_eq!(r.get_user_votes(&alice), &[Vote { proposal_id: 0, voter: alice.clone() }]);
    }

    #[test]
    fn test_counts_consistent_across_voters() {
        let voters = ["a", "b", "c", "d", "e"];
        let mut r = registry_with(&voters);
        let author = principal("a");
        let ids: Vec<_> = (0..3).map(|i| r.create_proposal(&author, format!("p{}", i)).unwrap()).collect();

        for (i, v) in voters.iter().enumerate() {
            let voter = principal(v);
            for id in ids.iter().take(i % 3 + 1) {
                assert!(r.cast_vote(&voter, *id));
                assert!(!r.cast_vote(&voter, *id));
            }
            assert!(!r.cast_vote(&voter, 42));
        }

        assert_counts_consistent(&r);
        assert_eq!(r.get_vote_count(0), 5);
        assert_eq!(r.get_vote_count(1), 3);
        assert_eq!(r.get_vote_count(2), 1);
        assert_eq!(r.get_user_votes(&principal("c")).len(), 3);

        let stats = r.stats();
        assert_eq!((stats.users, stats.proposals, stats.candidates, stats.votes), (5, 3, 0, 9));
    }

    #[test]
    fn test_snapshot_restores_counters() {
        let mut r = registry_with(&["alice"]);
        let alice = principal("alice");
        r.create_proposal(&alice, "first").unwrap();
        r.register_candidate(&alice, "Alice", "").unwrap();
        r.cast_vote(&alice, 0);

        let json = serde_json::to_string(&r).unwrap();
        let mut restored: Registry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, r);
        assert_eq!(restored.create_proposal(&alice, "second"), Some(1));
        assert_eq!(restored.register_candidate(&alice, "Again", ""), Some(1));
        assert!(!restored.cast_vote(&alice, 0));
    }

    #[test]
    fn test_rejection_error_codes() {
        assert_eq!(Error::from(Rejection::NotRegistered).code, ErrorCode::Unauthorized);
        assert_eq!(Error::from(Rejection::AlreadyVoted(3)).code, ErrorCode::Conflict);
        assert_eq!(Error::from(Rejection::UnknownProposal(3)).code, ErrorCode::NotFound);
        assert_eq!(Error::from(ValidationError::EmptyName).code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_request_validation() {
        assert!(validate_user_request(&RegisterUserRequest { name: "Alice".into() }).is_ok());
        assert_eq!(validate_user_request(&RegisterUserRequest { name: "   ".into() }), Err(ValidationError::EmptyName));
        assert_eq!(
            validate_user_request(&RegisterUserRequest { name: "x".repeat(MAX_NAME_LENGTH + 1) }),
            Err(ValidationError::NameTooLong)
        );
        assert_eq!(
            validate_candidate_request(&RegisterCandidateRequest { name: "Bob".into(), manifesto: "m".repeat(MAX_MANIFESTO_LENGTH + 1) }),
            Err(ValidationError::ManifestoTooLong)
        );
        assert!(validate_candidate_request(&RegisterCandidateRequest { name: "Bob".into(), manifesto: String::new() }).is_ok());
        assert_eq!(
            validate_proposal_request(&CreateProposalRequest { description: String::new() }),
            Err(ValidationError::EmptyDescription)
        );
        assert_eq!(
            validate_proposal_request(&CreateProposalRequest { description: "d".repeat(MAX_DESCRIPTION_LENGTH + 1) }),
            Err(ValidationError::DescriptionTooLong)
        );
    }

    #[test]
    fn test_principal_resolution() {
        assert_eq!(resolve_principal(Some("alice"), "1.2.3.4", None), principal("alice"));
        assert_eq!(
            resolve_principal(Some("  "), "1.2.3.4", Some("ua")),
            principal(&generate_server_fingerprint("1.2.3.4", Some("ua")))
        );
        assert_ne!(
            generate_server_fingerprint("1.2.3.4", Some("ua")),
            generate_server_fingerprint("1.2.3.5", Some("ua"))
        );
    }
}

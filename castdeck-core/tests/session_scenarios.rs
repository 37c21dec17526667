//! End-to-end session scenarios driven through the command surface
//!
//! Run with: cargo test --test session_scenarios

use std::sync::Arc;

use castdeck_core::{
    config::SessionSettings,
    models::{
        BroadcastType, Command, GiveawayId, PollResults, Product, ProductId, QAQuestion,
        QuestionId, SessionConfig, SessionEvent, StateDelta,
    },
    service::{BroadcastEventSink, FixedPicker, SessionContext, SessionController, SessionRegistry},
    Error,
};

fn controller(broadcast_type: BroadcastType) -> SessionController {
    SessionController::create_session(
        broadcast_type,
        SessionConfig::default(),
        SessionContext::default().with_picker(Arc::new(FixedPicker(3))),
    )
}

fn poll_results(delta: StateDelta) -> PollResults {
    match delta {
        StateDelta::PollUpdated { results } => results,
        other => panic!("expected poll update, got {other:?}"),
    }
}

fn questions(delta: StateDelta) -> Vec<QAQuestion> {
    match delta {
        StateDelta::QuestionsChanged { questions } => questions,
        other => panic!("expected question list, got {other:?}"),
    }
}

fn giveaway_id(delta: &StateDelta) -> GiveawayId {
    match delta {
        StateDelta::GiveawayUpdated { giveaway } => giveaway.id.clone(),
        other => panic!("expected giveaway update, got {other:?}"),
    }
}

fn vote_counts_match(results: &PollResults) -> bool {
    results.total_votes == results.options.iter().map(|o| o.votes).sum::<u64>()
}

#[test]
fn test_poll_voting_percentages() {
    let mut session = controller(BroadcastType::General);

    let poll = poll_results(
        session
            .handle(Command::CreatePoll {
                question: "Best topic?".into(),
                options: vec!["A".into(), "B".into(), "C".into()],
            })
            .unwrap(),
    );
    let (a, b) = (poll.options[0].option_id.clone(), poll.options[1].option_id.clone());

    for option_id in [&a, &a, &a, &b] {
        session
            .handle(Command::Vote {
                poll_id: poll.poll_id.clone(),
                option_id: option_id.clone(),
            })
            .unwrap();
    }

    let results = &session.snapshot().polls[0];
    assert_eq!(results.total_votes, 4);
    let percentages: Vec<u32> = results.options.iter().map(|o| o.percentage).collect();
    assert_eq!(percentages, vec![75, 25, 0]);
    assert!(vote_counts_match(results));
}

#[test]
fn test_poll_totals_survive_rejected_votes() {
    let mut session = controller(BroadcastType::General);
    let poll = poll_results(
        session
            .handle(Command::CreatePoll {
                question: "Pick one".into(),
                options: vec!["Yes".into(), "No".into()],
            })
            .unwrap(),
    );
    let yes = poll.options[0].option_id.clone();

    session
        .handle(Command::Vote {
            poll_id: poll.poll_id.clone(),
            option_id: yes.clone(),
        })
        .unwrap();
    assert!(matches!(
        session.handle(Command::Vote {
            poll_id: poll.poll_id.clone(),
            option_id: "unknown".into(),
        }),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        session.handle(Command::Vote {
            poll_id: "unknown".into(),
            option_id: yes,
        }),
        Err(Error::NotFound(_))
    ));

    let results = &session.snapshot().polls[0];
    assert_eq!(results.total_votes, 1);
    assert!(vote_counts_match(results));
}

#[test]
fn test_create_poll_option_bounds() {
    let mut session = controller(BroadcastType::General);
    let option_sets: [(&[&str], bool); 6] = [
        (&["A"], false),
        (&["A", "B"], true),
        (&["A", "B", "C", "D"], true),
        (&["A", "B", "C", "D", "E"], false),
        (&["A", "  "], false),
        (&["A", ""], false),
    ];

    for (options, accepted) in option_sets {
        let result = session.handle(Command::CreatePoll {
            question: "Question?".into(),
            options: options.iter().map(ToString::to_string).collect(),
        });
        assert_eq!(result.is_ok(), accepted, "options {options:?}");
        if !accepted {
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }
    }
    assert_eq!(session.snapshot().polls.len(), 2);
}

#[test]
fn test_pinned_question_ordering() {
    let mut session = controller(BroadcastType::General);

    let q1 = questions(
        session
            .handle(Command::SubmitQuestion {
                author: "John".into(),
                text: "When launch?".into(),
            })
            .unwrap(),
    )[0]
    .id
    .clone();
    session
        .handle(Command::TogglePinned {
            question_id: q1.clone(),
        })
        .unwrap();
    let list = questions(
        session
            .handle(Command::SubmitQuestion {
                author: "Sarah".into(),
                text: "Colors?".into(),
            })
            .unwrap(),
    );

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, q1);
    assert!(list[0].pinned);
    assert_eq!(list[1].author, "Sarah");
}

/// Every interleaving of submit and pin toggles keeps pinned first, each
/// group in submission order
#[test]
fn test_question_ordering_across_interleavings() {
    const STEPS: u32 = 6;

    for sequence in 0..4u32.pow(STEPS) {
        let mut session = controller(BroadcastType::General);
        let mut submitted: Vec<(QuestionId, bool)> = Vec::new();
        let mut code = sequence;

        for step in 0..STEPS {
            let op = code % 4;
            code /= 4;

            if op == 0 || submitted.is_empty() {
                let list = questions(
                    session
                        .handle(Command::SubmitQuestion {
                            author: "viewer".into(),
                            text: format!("question {step}"),
                        })
                        .unwrap(),
                );
                let newest = list
                    .iter()
                    .find(|q| q.text == format!("question {step}"))
                    .unwrap();
                submitted.push((newest.id.clone(), false));
                continue;
            }

            let index = match op {
                1 => 0,
                2 => submitted.len() - 1,
                _ => submitted.len() / 2,
            };
            session
                .handle(Command::TogglePinned {
                    question_id: submitted[index].0.clone(),
                })
                .unwrap();
            submitted[index].1 = !submitted[index].1;
        }

        let expected: Vec<QuestionId> = submitted
            .iter()
            .filter(|(_, pinned)| *pinned)
            .chain(submitted.iter().filter(|(_, pinned)| !*pinned))
            .map(|(id, _)| id.clone())
            .collect();
        let actual: Vec<QuestionId> = session
            .snapshot()
            .questions
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(actual, expected, "sequence {sequence}");
    }
}

#[test]
fn test_giveaway_lifecycle() {
    let mut session = controller(BroadcastType::General);

    let created = session
        .handle(Command::CreateGiveaway {
            title: "Prize Draw".into(),
            prize: "$50".into(),
        })
        .unwrap();
    let id = giveaway_id(&created);

    assert!(matches!(
        session.handle(Command::SelectWinner {
            giveaway_id: id.clone()
        }),
        Err(Error::NoParticipants(_))
    ));

    for i in 0..10 {
        session
            .handle(Command::EnterGiveaway {
                giveaway_id: id.clone(),
                participant: format!("viewer{i}"),
            })
            .unwrap();
    }

    match session
        .handle(Command::SelectWinner {
            giveaway_id: id.clone(),
        })
        .unwrap()
    {
        StateDelta::GiveawayUpdated { giveaway } => {
            assert_eq!(giveaway.participant_count, 10);
            assert_eq!(giveaway.winner.as_deref(), Some("viewer3"));
            assert!(!giveaway.active);
        }
        other => panic!("unexpected delta: {other:?}"),
    }

    // Terminal once drawn
    for _ in 0..3 {
        assert!(matches!(
            session.handle(Command::SelectWinner {
                giveaway_id: id.clone()
            }),
            Err(Error::InvalidState(_))
        ));
    }
    assert!(matches!(
        session.handle(Command::EnterGiveaway {
            giveaway_id: id,
            participant: "late".into(),
        }),
        Err(Error::InvalidState(_))
    ));
}

#[test]
fn test_banned_word_round_trip() {
    let mut session = controller(BroadcastType::General);
    let add = |word: &str| Command::AddBannedWord { word: word.into() };

    assert!(session.handle(add("spam")).is_ok());
    assert!(matches!(
        session.handle(add("spam")),
        Err(Error::DuplicateEntry(_))
    ));
    assert!(session
        .handle(Command::RemoveBannedWord {
            word: "spam".into()
        })
        .is_ok());
    assert!(session.handle(add("spam")).is_ok());

    for word in ["scam", " scam ", "spam", "bot", "scam"] {
        let _ = session.handle(add(word));
    }
    let words = session.snapshot().banned_words;
    assert_eq!(words, vec!["spam", "scam", "bot"]);
}

#[test]
fn test_chat_moderation() {
    let mut session = controller(BroadcastType::General);
    session
        .handle(Command::AddBannedWord {
            word: "spam".into(),
        })
        .unwrap();

    assert!(matches!(
        session.handle(Command::PostChatMessage {
            author: "troll".into(),
            text: "free spam here".into(),
            is_host: false,
        }),
        Err(Error::Blocked(_))
    ));
    assert!(matches!(
        session.handle(Command::PostChatMessage {
            author: "amy".into(),
            text: "   ".into(),
            is_host: false,
        }),
        Err(Error::InvalidInput(_))
    ));
    session
        .handle(Command::PostChatMessage {
            author: "Host".into(),
            text: "Welcome everyone".into(),
            is_host: true,
        })
        .unwrap();

    let messages = session.snapshot().messages;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_host);
}

#[test]
fn test_product_toggle_isolation() {
    let mut session = controller(BroadcastType::Commerce);
    for (id, name) in [("p1", "Serum"), ("p2", "Tint")] {
        session
            .handle(Command::AddProduct {
                product: Product::new(id, name, 20.0),
            })
            .unwrap();
    }
    let toggle = |id: &str| Command::ToggleProductActive {
        product_id: ProductId::from(id),
    };

    session.handle(toggle("p1")).unwrap();
    let active: Vec<bool> = session.snapshot().products.iter().map(|p| p.active).collect();
    assert_eq!(active, vec![true, false]);

    session.handle(toggle("p2")).unwrap();
    let active: Vec<bool> = session.snapshot().products.iter().map(|p| p.active).collect();
    assert_eq!(active, vec![true, true]);

    assert!(matches!(
        session.handle(Command::AddProduct {
            product: Product::new("p1", "Serum again", 5.0)
        }),
        Err(Error::DuplicateEntry(_))
    ));
    assert!(matches!(
        session.handle(toggle("p9")),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_ended_session_rejects_commands() {
    let mut session = controller(BroadcastType::Vod);
    session.handle(Command::EndSession).unwrap();

    let commands = vec![
        Command::SendNotice {
            message: "late".into(),
        },
        Command::AddBannedWord {
            word: "spam".into(),
        },
        Command::CreateGiveaway {
            title: "t".into(),
            prize: "p".into(),
        },
    ];
    for command in commands {
        assert!(matches!(session.handle(command), Err(Error::InvalidState(_))));
    }
    assert!(session.snapshot().session.status.is_ended());
}

#[tokio::test]
async fn test_registry_events_reach_subscribers() {
    let events = Arc::new(BroadcastEventSink::new(32));
    let mut receiver = events.subscribe();
    let registry = SessionRegistry::new(SessionSettings::default())
        .with_events(events.clone())
        .with_picker(Arc::new(FixedPicker(0)));

    let session = registry.create_session(BroadcastType::General, SessionConfig::default());
    registry
        .execute(
            Some(&session.id),
            Command::SendNotice {
                message: "Going live".into(),
            },
        )
        .await
        .unwrap();
    let snapshot = registry.end_session(&session.id).await.unwrap();

    assert_eq!(snapshot.notices.len(), 1);
    assert!(registry.get(&session.id).is_none());

    let first = receiver.recv().await.unwrap();
    assert_eq!(first.event_type(), "notice_sent");
    match receiver.recv().await.unwrap() {
        SessionEvent::SessionEnded {
            session_id,
            snapshot,
        } => {
            assert_eq!(session_id, session.id);
            assert_eq!(snapshot.notices[0].message, "Going live");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_operators_share_one_session() {
    let registry = SessionRegistry::new(SessionSettings::default());
    let session = registry.create_session(BroadcastType::General, SessionConfig::default());

    let mut tasks = Vec::new();
    for i in 0..20 {
        let registry = registry.clone();
        let session_id = session.id.clone();
        tasks.push(tokio::spawn(async move {
            registry
                .execute(
                    Some(&session_id),
                    Command::AddBannedWord {
                        word: format!("word{}", i % 10),
                    },
                )
                .await
        }));
    }

    let mut accepted = 0;
    let mut duplicates = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(Error::DuplicateEntry(_)) => duplicates += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!((accepted, duplicates), (10, 10));

    let handle = registry.get(&session.id).unwrap();
    assert_eq!(handle.snapshot().await.unwrap().banned_words.len(), 10);
}

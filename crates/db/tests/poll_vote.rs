//! Integration tests for the poll and vote repositories and `PgStore`.
//!
//! Exercises the schema rules the service depends on:
//! - Cascade delete of votes with their poll
//! - The partial unique index on `(poll_id, user_id)`
//! - Unrestricted anonymous votes
//! - Owner listing order

use assert_matches::assert_matches;
use pollbox_db::models::poll::{CreatePoll, UpdatePoll};
use pollbox_db::models::vote::CreateVote;
use pollbox_db::repositories::vote_repo::VOTE_UNIQUE_CONSTRAINT;
use pollbox_db::repositories::{PollRepo, VoteRepo};
use pollbox_db::store::{PgStore, PollStore, StoreError};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_poll(user_id: i64, question: &str) -> CreatePoll {
    CreatePoll {
        question: question.to_string(),
        options: vec!["Red".into(), "Green".into(), "Blue".into()],
        user_id,
    }
}

fn new_vote(poll_id: i64, user_id: Option<i64>, option_index: i32) -> CreateVote {
    CreateVote {
        poll_id,
        user_id,
        option_index,
    }
}

// ---------------------------------------------------------------------------
// Polls
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_poll(pool: PgPool) {
    let poll = PollRepo::create(&pool, &new_poll(1, "Colour?")).await.unwrap();

    let found = PollRepo::find_by_id(&pool, poll.id).await.unwrap().unwrap();
    assert_eq!(found.question, "Colour?");
    assert_eq!(found.options, vec!["Red", "Green", "Blue"]);
    assert_eq!(found.user_id, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_poll_requires_two_options(pool: PgPool) {
    let input = CreatePoll {
        question: "Lonely?".into(),
        options: vec!["Only".into()],
        user_id: 1,
    };
    let result = PollRepo::create(&pool, &input).await;
    assert!(result.is_err(), "single-option poll must violate the check constraint");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_owner_newest_first(pool: PgPool) {
    let older = PollRepo::create(&pool, &new_poll(1, "Older")).await.unwrap();
    PollRepo::create(&pool, &new_poll(2, "Someone else")).await.unwrap();
    let newer = PollRepo::create(&pool, &new_poll(1, "Newer")).await.unwrap();

    let polls = PollRepo::list_by_owner(&pool, 1).await.unwrap();
    let ids: Vec<i64> = polls.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    assert_eq!(PollRepo::list(&pool).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_options(pool: PgPool) {
    let poll = PollRepo::create(&pool, &new_poll(1, "Before")).await.unwrap();
    let input = UpdatePoll {
        question: "After".into(),
        options: vec!["Yes".into(), "No".into()],
    };

    let updated = PollRepo::update(&pool, poll.id, &input).await.unwrap().unwrap();
    assert_eq!(updated.question, "After");
    assert_eq!(updated.options, vec!["Yes", "No"]);
    assert!(updated.updated_at >= poll.updated_at);

    assert!(PollRepo::update(&pool, 999_999, &input).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_votes(pool: PgPool) {
    let poll = PollRepo::create(&pool, &new_poll(1, "Cascade")).await.unwrap();
    VoteRepo::create(&pool, &new_vote(poll.id, Some(2), 0)).await.unwrap();
    VoteRepo::create(&pool, &new_vote(poll.id, None, 1)).await.unwrap();

    assert!(PollRepo::delete(&pool, poll.id).await.unwrap());

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes WHERE poll_id = $1")
        .bind(poll.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert!(!PollRepo::delete(&pool, poll.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_vote_violates_unique_index(pool: PgPool) {
    let poll = PollRepo::create(&pool, &new_poll(1, "Once")).await.unwrap();
    VoteRepo::create(&pool, &new_vote(poll.id, Some(7), 0)).await.unwrap();

    let store = PgStore::new(pool.clone());
    let result = store.insert_vote(&new_vote(poll.id, Some(7), 2)).await;

    assert_matches!(
        result,
        Err(StoreError::UniqueViolation { constraint }) if constraint == VOTE_UNIQUE_CONSTRAINT
    );
    assert_eq!(VoteRepo::list_by_poll(&pool, poll.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_same_user_may_vote_on_different_polls(pool: PgPool) {
    let a = PollRepo::create(&pool, &new_poll(1, "A")).await.unwrap();
    let b = PollRepo::create(&pool, &new_poll(1, "B")).await.unwrap();

    VoteRepo::create(&pool, &new_vote(a.id, Some(7), 0)).await.unwrap();
    VoteRepo::create(&pool, &new_vote(b.id, Some(7), 0)).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_votes_are_not_unique(pool: PgPool) {
    let poll = PollRepo::create(&pool, &new_poll(1, "Anon")).await.unwrap();
    for _ in 0..3 {
        VoteRepo::create(&pool, &new_vote(poll.id, None, 1)).await.unwrap();
    }
    assert_eq!(VoteRepo::list_by_poll(&pool, poll.id).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vote_for_missing_poll_is_foreign_key_violation(pool: PgPool) {
    let store = PgStore::new(pool);
    let result = store.insert_vote(&new_vote(999_999, None, 0)).await;
    assert_matches!(result, Err(StoreError::ForeignKeyViolation { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_user_vote(pool: PgPool) {
    let poll = PollRepo::create(&pool, &new_poll(1, "Find")).await.unwrap();
    VoteRepo::create(&pool, &new_vote(poll.id, Some(4), 2)).await.unwrap();

    let store = PgStore::new(pool);
    let vote = store.find_user_vote(poll.id, 4).await.unwrap().unwrap();
    assert_eq!(vote.option_index, 2);
    assert!(store.find_user_vote(poll.id, 5).await.unwrap().is_none());
}

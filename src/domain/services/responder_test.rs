use std::collections::HashSet;

use anyhow::bail;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time;

use super::ReplyPlan;
use super::Responder;
use super::CANNED_REPLIES;
use super::IMAGE_REPLY;
use super::MAX_DELAY_MS;
use super::MIN_DELAY_MS;
use crate::domain::models::Event;
use crate::domain::models::Reply;

fn plan(delay_ms: u64, text: &str) -> ReplyPlan {
    return ReplyPlan {
        delay: time::Duration::from_millis(delay_ms),
        text: text.to_string(),
    };
}

fn to_reply(event: Option<Event>) -> Result<Reply> {
    match event {
        Some(Event::AssistantReply(reply)) => return Ok(reply),
        _ => bail!("Wrong enum"),
    }
}

mod reply_plan {
    use super::*;

    #[test]
    fn it_picks_canned_replies_within_delay_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let plan = ReplyPlan::new(false, &mut rng);
            let delay_ms = plan.delay.as_millis() as u64;
            assert!(delay_ms >= MIN_DELAY_MS);
            assert!(delay_ms < MAX_DELAY_MS);
            assert!(CANNED_REPLIES.contains(&plan.text.as_str()));
            seen.insert(plan.text);
        }

        assert_eq!(seen.len(), CANNED_REPLIES.len());
    }

    #[test]
    fn it_always_uses_image_reply_for_images() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let plan = ReplyPlan::new(true, &mut rng);
            assert_eq!(plan.text, IMAGE_REPLY);
            assert!(!CANNED_REPLIES.contains(&plan.text.as_str()));
        }
    }
}

mod responder {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn it_delivers_reply_after_delay() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        let mut responder = Responder::new(tx);
        let start = time::Instant::now();

        let ticket = responder.schedule_plan("1", plan(1500, "Hi!"));
        assert!(responder.is_pending("1"));
        assert!(!responder.is_pending("2"));

        let early = time::timeout(time::Duration::from_millis(1499), rx.recv()).await;
        assert!(early.is_err());

        let reply = to_reply(rx.recv().await)?;
        assert!(start.elapsed() >= time::Duration::from_millis(1500));
        assert_eq!(reply.ticket, ticket);
        assert_eq!(reply.conversation_id, "1");
        assert_eq!(reply.text, "Hi!");

        assert!(responder.complete(ticket));
        assert!(!responder.is_pending("1"));
        assert!(!responder.complete(ticket));

        return Ok(());
    }

    #[tokio::test(start_paused = true)]
    async fn it_schedules_random_replies() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        let mut responder = Responder::new(tx);

        responder.schedule("1", false);
        let reply = to_reply(rx.recv().await)?;
        assert!(CANNED_REPLIES.contains(&reply.text.as_str()));

        responder.schedule("1", true);
        let reply = to_reply(rx.recv().await)?;
        assert_eq!(reply.text, IMAGE_REPLY);

        return Ok(());
    }

    #[tokio::test(start_paused = true)]
    async fn it_keeps_target_conversation() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        let mut responder = Responder::new(tx);

        responder.schedule_plan("a", plan(2000, "for a"));
        responder.schedule_plan("b", plan(1000, "for b"));

        let first = to_reply(rx.recv().await)?;
        let second = to_reply(rx.recv().await)?;
        assert_eq!(first.conversation_id, "b");
        assert_eq!(second.conversation_id, "a");
        assert_eq!(second.text, "for a");

        return Ok(());
    }

    #[tokio::test(start_paused = true)]
    async fn it_cancels_pending_replies() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        let mut responder = Responder::new(tx);

        responder.schedule_plan("1", plan(1000, "one"));
        responder.schedule_plan("1", plan(1200, "two"));
        let kept = responder.schedule_plan("2", plan(1500, "three"));
        assert_eq!(responder.pending_count(), 3);

        assert_eq!(responder.cancel("1"), 2);
        assert!(!responder.is_pending("1"));
        assert_eq!(responder.cancel("1"), 0);

        let reply = to_reply(rx.recv().await)?;
        assert_eq!(reply.ticket, kept);

        let nothing = time::timeout(time::Duration::from_millis(5000), rx.recv()).await;
        assert!(nothing.is_err());

        return Ok(());
    }
}

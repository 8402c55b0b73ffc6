//! Participant-facing texts.

pub const INTERMEDIARY: &str =
    "You are now beginning a different session. These are NEW slot machines!!!";

pub const GOODBYE: &str = "The experiment is now done. Thank you for your participation.";

pub fn instructions(trials_per_block: u32, continue_key: &str) -> String {
    format!(
        "Welcome to the Slot Machine experiment!\n\n\
         You will be gambling. Make sure to get as high a score as possible!\n\n\
         There are 2 machines you can play. There will be two sessions. \
         In each session, you will get to play {trials_per_block} rounds.\n\n\
         If you want to pull the machine on the left, press 'left'.\n\n\
         If you want to pull the machine on the right, press 'right'.\n\n\
         After you've seen your rewards/losses, continue with \"{continue_key}\".\n\n\
         Press the \"{continue_key}\"-button when you are ready to start."
    )
}

pub fn feedback(reward: i32, score: i32) -> String {
    format!("Reward: {reward}. Total score: {score}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_name_rounds_and_keys() {
        let text = instructions(100, "space");
        assert!(text.contains("play 100 rounds"));
        assert!(text.contains("press 'left'"));
        assert!(text.contains("press 'right'"));
        assert!(text.contains("Press the \"space\"-button"));
    }

    #[test]
    fn feedback_shows_signed_values() {
        assert_eq!(feedback(-4, -9), "Reward: -4. Total score: -9.");
        assert_eq!(feedback(0, 0), "Reward: 0. Total score: 0.");
    }
}

//! Crypt module - encrypts or decrypts posts on command, or at random when
//! the bot is mentioned, messaged or replied to.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::commands::{crypt_command, random_command, reverse, rot13, xor_block_chaining};
use crate::application::errors::BotError;
use crate::application::messaging::{reply_with_command, ReactPolicy};
use crate::domain::entities::{Command, CommandTable, NotificationEvent};
use crate::domain::traits::{
    ModuleConfiguration, ModuleContext, NotifyOutcome, RandomSource, SockModule,
};

pub struct Crypt {
    commands: CommandTable,
    policy: ReactPolicy,
}

impl Crypt {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        let commands = CommandTable::new()
            .with(
                Command::new("rot13")
                    .with_description("Rot13 encoding.")
                    .with_handler(crypt_command(rot13))
                    .random_pickable(),
            )
            .with(
                Command::new("reverse")
                    .with_description("Reverse input.")
                    .with_handler(crypt_command(reverse))
                    .random_pickable(),
            )
            .with(
                Command::new("xorbc")
                    .with_description("XOR with block chaining.")
                    .with_handler(crypt_command(xor_block_chaining(false)))
                    .with_param("[key")
                    .with_param("[iv")
                    .with_default("key", "42"),
            )
            .with(
                Command::new("rxorbc")
                    .with_description("reverse XOR with block chaining.")
                    .with_handler(crypt_command(xor_block_chaining(true)))
                    .with_param("[key")
                    .with_param("[iv")
                    .with_default("key", "42"),
            )
            // random does not pass parameters on, so only parameterless
            // commands are pickable
            .with(
                Command::new("random")
                    .with_description("Random encryption.")
                    .with_handler(random_command(rng)),
            );

        Self {
            commands,
            policy: ReactPolicy::default(),
        }
    }
}

#[async_trait]
impl SockModule for Crypt {
    fn name(&self) -> &str {
        "Crypt"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn description(&self) -> &str {
        "Encryptor"
    }

    fn configuration(&self) -> Option<ModuleConfiguration> {
        Some(ModuleConfiguration::disabled())
    }

    fn commands(&self) -> &CommandTable {
        &self.commands
    }

    async fn begin(&self, ctx: &ModuleContext) -> Result<(), BotError> {
        ctx.session.log(&format!(
            "Crypt ready with {} commands ({} pickable at random)",
            self.commands.len(),
            self.commands.random_pickable().len()
        ));
        Ok(())
    }

    async fn on_notify(&self, event: &NotificationEvent, ctx: &ModuleContext) -> Result<NotifyOutcome, BotError> {
        let Some(post) = self.policy.applies(event) else {
            return Ok(NotifyOutcome::Ignored);
        };
        ctx.session.log("Randomly encrypting post");

        reply_with_command(ctx, &self.commands, "random", event, post).await?;
        Ok(NotifyOutcome::Handled)
    }
}

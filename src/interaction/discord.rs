// discord.rs
use super::menu::{Acknowledgement, FrontEnd, Menu, Reply, TextCommand, Tone};
use crate::{config::DiscordSettings, error::AppError};
use async_trait::async_trait;
use serenity::all::{
    ButtonStyle, Client, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
    EditInteractionResponse, EventHandler, GatewayIntents, Interaction, Message, Ready,
};
use std::sync::Arc;
use tracing::{error, info};

const BUTTONS_PER_ROW: usize = 5;

pub struct Handler {
    front: Arc<FrontEnd>,
    prefix: String,
}

impl Handler {
    pub fn new(front: Arc<FrontEnd>, prefix: impl Into<String>) -> Self {
        Self {
            front,
            prefix: prefix.into(),
        }
    }

    async fn handle_component(
        &self,
        ctx: &Context,
        component: &ComponentInteraction,
    ) -> Result<(), AppError> {
        let action = match self.front.acknowledgement(&component.data.custom_id) {
            Acknowledgement::DeferPublic(action) => action,
            Acknowledgement::Immediate => {
                let reply = self.front.click(&component.data.custom_id).await;
                return respond(ctx, component, &reply).await;
            }
        };

        // Retries may exceed the three-second acknowledgement window.
        component
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
            )
            .await?;
        let reply = self.front.select(action).await;
        component
            .edit_response(&ctx.http, EditInteractionResponse::new().content(reply.text()))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("We have logged in as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(command) = TextCommand::parse(&self.prefix, &msg.content) else {
            return;
        };

        info!(channel = %msg.channel_id, author = %msg.author.name, ?command, "Text command");
        let reply = self.front.run_text(command).await;
        let mut builder = CreateMessage::new().content(reply.text());
        if let Reply::Menu(menu) = &reply {
            builder = builder.components(action_rows(menu));
        }
        if let Err(e) = msg.channel_id.send_message(&ctx.http, builder).await {
            error!("Failed to send reply: {}", e);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };
        if let Err(e) = self.handle_component(&ctx, &component).await {
            error!(custom_id = %component.data.custom_id, "Failed to answer interaction: {}", e);
        }
    }
}

async fn respond(
    ctx: &Context,
    component: &ComponentInteraction,
    reply: &Reply,
) -> Result<(), AppError> {
    let mut message = CreateInteractionResponseMessage::new()
        .content(reply.text())
        .ephemeral(reply.is_private());
    if let Reply::Menu(menu) = reply {
        message = message.components(action_rows(menu));
    }
    component
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

pub fn action_rows(menu: &Menu) -> Vec<CreateActionRow> {
    menu.options
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| {
            CreateActionRow::Buttons(
                chunk
                    .iter()
                    .map(|option| {
                        CreateButton::new(option.action.custom_id())
                            .label(&option.label)
                            .style(button_style(option.tone))
                    })
                    .collect(),
            )
        })
        .collect()
}

fn button_style(tone: Tone) -> ButtonStyle {
    match tone {
        Tone::Primary => ButtonStyle::Primary,
        Tone::Secondary => ButtonStyle::Secondary,
        Tone::Success => ButtonStyle::Success,
        Tone::Danger => ButtonStyle::Danger,
    }
}

/// Connects to the gateway and blocks until the connection ends.
pub async fn run(settings: &DiscordSettings, front: Arc<FrontEnd>) -> Result<(), AppError> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&settings.token, intents)
        .event_handler(Handler::new(front, settings.command_prefix.clone()))
        .await?;

    info!("Starting chat client");
    client.start().await?;
    Ok(())
}

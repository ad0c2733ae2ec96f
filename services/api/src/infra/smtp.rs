use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::Mailer;

/// SMTP-backed mail delivery. The account user doubles as the From address.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(host: &str, user: &str, pass: &str) -> anyhow::Result<Self> {
        let creds = Credentials::new(user.to_owned(), pass.to_owned());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(creds)
            .build();
        Ok(Self {
            transport,
            from: user.to_owned(),
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_owned())?;
        self.transport.send(email).await?;
        Ok(())
    }
}

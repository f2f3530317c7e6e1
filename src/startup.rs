use crate::configuration::Settings;
use crate::cors::{CorsPolicy, apply_cors_policy};
use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use crate::routes::{health_check, home, method_not_allowed, not_found, submit_contact_form};
use actix_web::dev::Server;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use anyhow::anyhow;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

/// Name of the deployment, surfaced by the health and info endpoints.
pub struct EnvironmentName(pub String);

/// Operator addresses every contact notification is sent from and to.
pub struct ContactMailbox {
    pub sender: EmailAddress,
    pub recipient: EmailAddress,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let email_client = config.email_client.client()?;
        if !email_client.is_configured() {
            tracing::warn!("No email provider API key configured; contact submissions will fail");
        }

        let mailbox = ContactMailbox {
            sender: config.email_client.sender().map_err(|e| anyhow!(e))?,
            recipient: config.email_client.recipient().map_err(|e| anyhow!(e))?,
        };

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            email_client,
            mailbox,
            config.cors.policy(),
            config.app.environment,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    mailbox: ContactMailbox,
    cors_policy: CorsPolicy,
    environment: String,
) -> Result<Server, anyhow::Error> {
    let email_client = web::Data::new(email_client);
    let mailbox = web::Data::new(mailbox);
    let cors_policy = web::Data::new(cors_policy);
    let environment = web::Data::new(EnvironmentName(environment));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(apply_cors_policy))
            .wrap(TracingLogger::default())
            .service(
                web::resource("/")
                    .route(web::get().to(home))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/api/health")
                    .route(web::get().to(health_check))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/api/contact")
                    .route(web::post().to(submit_contact_form))
                    .default_service(web::to(method_not_allowed)),
            )
            .default_service(web::to(not_found))
            .app_data(email_client.clone())
            .app_data(mailbox.clone())
            .app_data(cors_policy.clone())
            .app_data(environment.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

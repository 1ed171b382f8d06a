/* fleet-remote-access
 * Copyright (C) 2025 Frederic Henrichs <frederic@tinkerforge.com>
 *
 * This library is free software; you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public
 * License as published by the Free Software Foundation; either
 * version 2 of the License, or (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with this library; if not, write to the
 * Free Software Foundation, Inc., 59 Temple Place - Suite 330,
 * Boston, MA 02111-1307, USA.
 */

use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use db_connector::{get_connection_pool, run_migrations};
use fleet_backend::{command_hub::CommandHub, routes, AppState};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap()
        .build();

    #[cfg(debug_assertions)]
    let level = LevelFilter::Debug;
    #[cfg(not(debug_assertions))]
    let level = LevelFilter::Info;

    CombinedLogger::init(vec![TermLogger::new(
        level,
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .unwrap();

    dotenvy::dotenv().ok();

    let pool = get_connection_pool();
    let mut conn = pool.get().expect("Failed to get connection from pool");
    run_migrations(&mut conn).expect("Failed to run migrations");

    let state = web::Data::new(AppState { pool });
    let command_hub = web::Data::new(CommandHub::default());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(command_hub.clone())
            .service(web::scope("/api").configure(routes::configure))
    });

    let port = std::env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let addr = format!("0.0.0.0:{port}");
    log::info!("Starting server on {addr}");
    server.bind(&addr)?.run().await?;

    Ok(())
}

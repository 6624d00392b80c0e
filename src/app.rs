//! Command dispatch: wires collaborators together and executes the actions
//! the orchestrator announces.

use crate::assistant::{Announcer, LogAnnouncer, NoopAnnouncer, Orchestrator, TriggeredAction};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::geo::types::{Coordinates, Place, RouteMetrics};
use crate::geo::{GeocodeClient, IpLocateClient, RoutingClient};
use crate::providers::{GeminiProvider, Provider};
use crate::session::{AnalysisResult, Page, SessionState};
use crate::traffic::heuristics::{self, analyze_condition, estimate_clear_time};
use crate::traffic::synthetic::{self, Anomaly, HeatmapCache};
use crate::traffic::types::{DensityTier, TrafficLabel, Weather};
use crate::traffic::vision::{Classifier, Counter, RandomClassifier, RandomCounter, VehicleMix, severity};
use crate::ui;
use crate::util::format::{confidence_color, format_distance, format_duration};
use crate::util::time::{peak_status, time_category};
use chrono::{Local, Timelike};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

pub async fn dispatch(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Chat { message } => chat(config, message).await,
        Commands::Route {
            from,
            to,
            no_alternatives,
        } => plan_route_command(&config, from.as_deref(), &to, !no_alternatives).await,
        Commands::Status { location } => {
            print_status(&config, &location);
            Ok(())
        }
        Commands::Heatmap { lat, lon } => heatmap_command(&config, lat, lon).await,
        Commands::Locate => locate_command(&config).await,
        Commands::Analyze { image } => analyze_command(&config, &image),
    }
}

// ─── Chat ───────────────────────────────────────────────────────────────────

async fn chat(config: Config, message: Option<String>) -> anyhow::Result<()> {
    let provider: Arc<dyn Provider> = Arc::new(GeminiProvider::new(&config));
    let announcer: Arc<dyn Announcer> = if config.voice_enabled {
        Arc::new(LogAnnouncer)
    } else {
        Arc::new(NoopAnnouncer)
    };
    let mut orchestrator = Orchestrator::new(provider, config.clone()).with_announcer(announcer);

    let mut session = SessionState::new();
    session.page = Page::Chat;
    session.location = Some(IpLocateClient::new(&config).locate_or_default().await);

    if let Some(message) = message {
        run_exchange(&message, &config, &mut session, &mut orchestrator).await;
        return Ok(());
    }

    println!("{}", ui::header("Routewise traffic assistant"));
    if let Some(location) = &session.location {
        println!("{}", ui::dim(format!("Location: {}", location.display_name)));
    }
    println!("{}", ui::dim("Type 'exit' to quit."));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        run_exchange(line, &config, &mut session, &mut orchestrator).await;
    }
    Ok(())
}

async fn run_exchange(
    message: &str,
    config: &Config,
    session: &mut SessionState,
    orchestrator: &mut Orchestrator,
) {
    let outcome = orchestrator.respond(message, session).await;
    println!("{}", ui::accent(&outcome.reply));

    if let Some(action) = outcome.action {
        execute_action(action, config, session, orchestrator).await;
    }

    if let Some(alert) = orchestrator.check_alerts(session, Local::now()) {
        println!("{}", ui::alert(alert));
    }
}

/// The orchestrator announces, this caller executes.
async fn execute_action(
    action: TriggeredAction,
    config: &Config,
    session: &mut SessionState,
    orchestrator: &Orchestrator,
) {
    match action {
        TriggeredAction::Analyze => {
            session.page = Page::Analysis;
            // No image in a chat flow; the stub capabilities work without
            // one, a real deployment would prompt for a capture here.
            run_analysis(config, session, &[]);
        }
        TriggeredAction::Route { destination: None } => {
            // The reply already asked for a destination.
        }
        TriggeredAction::Route {
            destination: Some(destination),
        } => {
            session.page = Page::RoutePlanning;
            if let Err(e) =
                plan_route_into_session(config, session, Some(orchestrator), &destination, true)
                    .await
            {
                println!("{}", ui::warn(format!("Route planning failed: {e}")));
            }
        }
        TriggeredAction::Heatmap => {
            session.page = Page::Heatmap;
            show_heatmap(session);
        }
    }
}

// ─── Route planning ─────────────────────────────────────────────────────────

async fn plan_route_command(
    config: &Config,
    from: Option<&str>,
    to: &str,
    alternatives: bool,
) -> anyhow::Result<()> {
    let mut session = SessionState::new();
    session.location = match from {
        Some(query) => Some(resolve_place(config, query).await?),
        None => Some(IpLocateClient::new(config).locate_or_default().await),
    };
    plan_route_into_session(config, &mut session, None, to, alternatives).await
}

async fn resolve_place(config: &Config, query: &str) -> anyhow::Result<Place> {
    GeocodeClient::new(config)
        .geocode(query)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no match for '{query}'"))
}

async fn plan_route_into_session(
    config: &Config,
    session: &mut SessionState,
    orchestrator: Option<&Orchestrator>,
    destination_query: &str,
    alternatives: bool,
) -> anyhow::Result<()> {
    let Some(destination) = GeocodeClient::new(config).geocode(destination_query).await? else {
        println!(
            "{}",
            ui::warn(format!("Could not find '{destination_query}' on the map."))
        );
        return Ok(());
    };
    let start = match &session.location {
        Some(place) => place.clone(),
        None => IpLocateClient::new(config).locate_or_default().await,
    };

    let Some(routes) = RoutingClient::new(config)
        .fetch_routes(start.coords, destination.coords, alternatives)
        .await?
    else {
        println!(
            "{}",
            ui::warn(format!(
                "No drivable route from {} to {}.",
                start.display_name, destination.display_name
            ))
        );
        return Ok(());
    };

    println!(
        "{}",
        ui::header(format!("Routes to {}", destination.display_name))
    );
    let reroute = session.analysis.as_ref().is_some_and(|analysis| {
        heuristics::should_reroute(analysis.label, analysis.vehicle_count, &config.thresholds)
    });

    for (i, route) in routes.iter().enumerate() {
        let tag = if route.is_primary {
            if reroute { "Primary (jammed)" } else { "Primary" }
        } else if reroute && i == 1 {
            "Alternate (recommended)"
        } else {
            "Alternate"
        };
        println!(
            "  {tag}: {} | {}",
            format_distance(route.distance_km),
            format_duration(route.duration_min)
        );
    }

    let traffic_factor = session
        .analysis
        .as_ref()
        .map_or(1.0, |analysis| analysis.label.clear_time_factor().max(1.0));
    let metrics = RouteMetrics::for_route(routes.primary(), traffic_factor);
    println!(
        "{}",
        ui::dim(format!(
            "  With traffic: {} | est. fuel {:.1} L | difficulty {:.0}/100",
            format_duration(metrics.actual_duration_min),
            metrics.estimated_fuel_l,
            metrics.difficulty
        ))
    );

    if reroute {
        println!("{}", ui::alert("MAIN ROUTE JAMMED - take the alternate route."));
        if let Some(orchestrator) = orchestrator {
            orchestrator.announce("Main route is jammed. Taking alternate route shown in green.");
        }
    } else {
        println!("{}", ui::success("Route is clear - proceed on the recommended path."));
    }

    session.trip = Some(crate::session::PlannedTrip {
        destination,
        routes,
    });
    Ok(())
}

// ─── Status / heat map / locate / analyze ───────────────────────────────────

fn print_status(config: &Config, location: &str) {
    let now = Local::now();
    let snap = synthetic::snapshot(location, now, &config.thresholds, &config.peak_hours);
    println!("{}", ui::header(format!("Traffic at {location}")));
    println!("  Vehicles: {}", snap.vehicle_count);
    println!("  Density: {} ({})", snap.density, snap.color);
    println!("  Delay: about {} min", snap.delay_minutes);
    if let Some(anomaly) = snap.anomaly {
        let label = match anomaly {
            Anomaly::Accident => TrafficLabel::Accident,
            Anomaly::VehicleStall => TrafficLabel::HeavyTraffic,
            Anomaly::RoadWork => TrafficLabel::Construction,
        };
        println!(
            "{}",
            ui::warn(format!("  {}", heuristics::condition_alert(label, location)))
        );
    }
    let (_, peak_label) = peak_status(now, &config.peak_hours);
    println!(
        "{}",
        ui::dim(format!(
            "  {} | {} | {}",
            snap.timestamp,
            peak_label,
            time_category(now)
        ))
    );
}

async fn heatmap_command(config: &Config, lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<()> {
    let mut session = SessionState::new();
    session.location = match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let coords = Coordinates::new(lat, lon);
            if !coords.is_valid() {
                println!("{}", ui::warn(format!("Coordinates {lat}, {lon} are out of range.")));
                return Ok(());
            }
            Some(Place {
                coords,
                display_name: format!("{lat:.4}, {lon:.4}"),
            })
        }
        _ => Some(IpLocateClient::new(config).locate_or_default().await),
    };
    show_heatmap(&mut session);
    Ok(())
}

fn show_heatmap(session: &mut SessionState) {
    // With a trip planned, center between the start and the destination.
    let center = match (&session.location, &session.trip) {
        (Some(start), Some(trip)) => start.coords.midpoint(&trip.destination.coords),
        (Some(start), None) => start.coords,
        (None, Some(trip)) => trip.destination.coords,
        (None, None) => {
            println!("{}", ui::warn("Set a location first."));
            return;
        }
    };

    let now = Local::now();
    let cache = session
        .heatmap
        .get_or_insert_with(|| HeatmapCache::generate(center, now));
    cache.refresh(center, now);

    let mut counts = [0usize; 3];
    for point in cache.points() {
        match point.tier {
            DensityTier::Low => counts[0] += 1,
            DensityTier::Medium => counts[1] += 1,
            DensityTier::High => counts[2] += 1,
        }
    }
    println!("{}", ui::header("Traffic heat map"));
    println!(
        "  {} points: {} high / {} medium / {} low",
        cache.points().len(),
        counts[2],
        counts[1],
        counts[0]
    );
    println!(
        "{}",
        ui::dim(format!(
            "  Next refresh in {} seconds",
            cache.seconds_until_refresh(now)
        ))
    );
}

async fn locate_command(config: &Config) -> anyhow::Result<()> {
    match IpLocateClient::new(config).locate().await {
        Ok(Some(location)) => {
            println!(
                "{}",
                ui::success(format!("Location detected: {}", location.display_name()))
            );
        }
        Ok(None) => println!(
            "{}",
            ui::warn("Location service refused the lookup; using default location.")
        ),
        Err(e) => println!(
            "{}",
            ui::warn(format!("Could not detect location: {e}"))
        ),
    }
    Ok(())
}

fn analyze_command(config: &Config, image_path: &std::path::Path) -> anyhow::Result<()> {
    let image = std::fs::read(image_path)?;
    let mut session = SessionState::new();
    run_analysis(config, &mut session, &image);
    Ok(())
}

fn run_analysis(config: &Config, session: &mut SessionState, image: &[u8]) {
    let classifier = RandomClassifier;
    let counter = RandomCounter;

    let (label, confidence) = match classifier.classify(image) {
        Ok(result) => result,
        Err(e) => {
            println!("{}", ui::warn(format!("Classification failed: {e}")));
            return;
        }
    };
    let vehicle_count = match counter.count(image) {
        Ok(count) => count,
        Err(e) => {
            println!("{}", ui::warn(format!("Vehicle counting failed: {e}")));
            return;
        }
    };

    let now = Local::now();
    let peak = config.peak_hours.is_peak(now.hour());
    let clear_time = estimate_clear_time(vehicle_count, label, peak, Weather::Clear);
    let analysis = analyze_condition(label, vehicle_count, confidence, &config.thresholds);

    let styled_confidence = match confidence_color(confidence) {
        "green" => ui::success(format!("{:.1}%", confidence * 100.0)),
        "orange" => ui::warn(format!("{:.1}%", confidence * 100.0)),
        _ => ui::alert(format!("{:.1}%", confidence * 100.0)),
    };
    let sev = severity(label);
    let mix = VehicleMix::from_total(vehicle_count);

    println!("{}", ui::header("Analysis results"));
    println!("  Condition: {label} (confidence {styled_confidence})");
    println!("  Severity: {} ({})", sev.level, sev.color);
    println!("  Vehicles: {vehicle_count} ({} density)", analysis.density);
    println!(
        "{}",
        ui::dim(format!(
            "  Mix: {} cars, {} bikes, {} trucks, {} buses",
            mix.cars, mix.bikes, mix.trucks, mix.buses
        ))
    );
    println!("  Estimated clear time: {clear_time} min");
    if analysis.is_critical {
        println!("{}", ui::alert(&analysis.recommendation));
    } else {
        println!("  {}", analysis.recommendation);
    }

    session.record_analysis(AnalysisResult {
        label,
        confidence,
        vehicle_count,
        clear_time_min: clear_time,
    });
}

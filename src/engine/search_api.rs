use super::Engine;

use async_trait::async_trait;

use crate::api::{SearchAPI, SessionEvent};
use crate::entities::{Place, QueryRole, Route};
use crate::error::{not_found_error, Error};

#[async_trait]
impl SearchAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn search(&self) -> Result<Option<Route>, Error> {
        let generation = self.next_generation();
        let _guard = self.search_lock.lock().await;

        match self.run_search(generation).await {
            Ok(route) => Ok(route),
            Err(err) => {
                // A failed search must not leave a path on the map that no
                // longer matches the displayed markers.
                if self.is_current(generation) {
                    self.clear_route().await;
                }

                Err(err)
            }
        }
    }
}

impl Engine {
    async fn run_search(&self, generation: u64) -> Result<Option<Route>, Error> {
        let (origin_query, destination_query) = {
            let state = self.state.lock().await;
            (state.origin_query.clone(), state.destination_query.clone())
        };

        let origin = self.resolve_role(QueryRole::Origin, &origin_query).await?;
        let destination = self
            .resolve_role(QueryRole::Destination, &destination_query)
            .await?;

        if !self.is_current(generation) {
            tracing::info!("search superseded before routing, discarding");
            return Ok(None);
        }

        let (origin, destination) = match (origin, destination) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => {
                tracing::warn!("at least one role unresolved, skipping routing");
                self.clear_route().await;
                return Err(not_found_error());
            }
        };

        tracing::info!("both roles resolved, requesting route...");

        let route = self.router.create_route(origin, destination).await?;

        if !self.is_current(generation) {
            tracing::info!("search superseded after routing, discarding result");
            return Ok(None);
        }

        {
            let mut state = self.state.lock().await;
            state.route = Some(route.clone());
        }

        self.emit(SessionEvent::RouteUpdated {
            route: route.clone(),
        });

        let leg = route.first_leg().cloned().unwrap_or_default();
        self.narrator.narrate(&leg).await;

        Ok(Some(route))
    }

    /// Resolves one role. An empty or unmatched query maps to `Ok(None)`
    /// with a per-role "no results" signal; only transport and parse
    /// failures abort the search.
    #[tracing::instrument(skip(self))]
    async fn resolve_role(&self, role: QueryRole, query: &str) -> Result<Option<Place>, Error> {
        if query.trim().is_empty() {
            tracing::warn!("empty {} query, geocoding skipped", role);
            self.set_place(role, None).await;
            self.emit(SessionEvent::PlaceNotFound { role });
            return Ok(None);
        }

        match self.geocoder.resolve(query).await {
            Ok(place) => {
                self.set_place(role, Some(place.clone())).await;
                self.emit(SessionEvent::PlaceResolved {
                    role,
                    place: place.clone(),
                });

                Ok(Some(place))
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!("no geocode candidates for {}", role);
                self.set_place(role, None).await;
                self.emit(SessionEvent::PlaceNotFound { role });

                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn set_place(&self, role: QueryRole, place: Option<Place>) {
        self.state.lock().await.set_place(role, place);
    }

    async fn clear_route(&self) {
        let cleared = self.state.lock().await.route.take().is_some();

        if cleared {
            self.emit(SessionEvent::RouteCleared);
        }
    }
}

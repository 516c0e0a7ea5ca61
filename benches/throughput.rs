use criterion::{criterion_group, criterion_main, Criterion};
use routedispatch::config::{parse_routes, RoutesFormat};
use routedispatch::dependencies::{Dependencies, DependencySource};
use routedispatch::error::DispatcherError;
use routedispatch::handler::Controller;
use routedispatch::registry::HandlerRegistry;
use routedispatch::request::Request;
use routedispatch::response::Response;
use routedispatch::router::{PathParams, Router};
use routedispatch::Dispatcher;
use std::hint::black_box;

fn example_routes() -> &'static str {
    r#"
root:
  path: /
  methods: GET
  controller: zoo.Root
animals:
  path: /zoo/animals
  methods: [GET, POST]
  controller: zoo.Animals
animal:
  path: /zoo/animals/{id}
  methods: [GET, PUT, PATCH, DELETE]
  controller: zoo.Animal
  requirements: { id: '\d+' }
animal_toy:
  path: /zoo/animals/{id}/toys/{toy_id}
  methods: GET
  controller: zoo.AnimalToy
habitat_section:
  path: /zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}
  methods: GET
  controller: zoo.HabitatSection
item_batch:
  path: /inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}
  methods: POST
  controller: zoo.ItemBatch
complex:
  path: /complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}
  methods: GET
  controller: zoo.Complex
health:
  path: /zoo/health
  methods: [HEAD, OPTIONS]
  controller: zoo.Health
  protocols: [http, https]
  host: '[a-z]+\.zoo\.test'
"#
}

fn router() -> Router {
    let routes = parse_routes(example_routes(), RoutesFormat::Yaml).expect("valid route table");
    Router::from_collection(routes)
}

struct Echo;

impl Controller for Echo {
    fn construct(_request: &Request, _deps: &Dependencies) -> Result<Self, DispatcherError> {
        Ok(Echo)
    }

    fn call_action(
        &self,
        _action: &str,
        params: &PathParams,
    ) -> Option<Result<Response, DispatcherError>> {
        Some(Ok(Response::ok(params.values().collect::<Vec<_>>().join(","))))
    }
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = router();
    let requests = [
        Request::new("GET", "/zoo/animals/123"),
        Request::new("GET", "/zoo/animals/123/toys/456"),
        Request::new("GET", "/zoo/cats/animals/123/habitats/88/sections/5"),
        Request::new("POST", "/inventory/1/feeds/2/items/3/batches/4"),
        Request::new("GET", "/complex/1/2/3/4/5/6/7/8/9"),
        Request::new("HEAD", "/zoo/health").with_host("api.zoo.test"),
        Request::new("GET", "/does/not/exist"),
    ];
    c.bench_function("route_match", |b| {
        b.iter(|| {
            for request in &requests {
                black_box(router.match_request(black_box(request)));
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let mut registry = HandlerRegistry::new();
    for id in [
        "zoo.Root",
        "zoo.Animals",
        "zoo.Animal",
        "zoo.AnimalToy",
        "zoo.HabitatSection",
        "zoo.ItemBatch",
        "zoo.Complex",
        "zoo.Health",
    ] {
        registry.register::<Echo>(id);
    }
    let dispatcher = Dispatcher::new(router(), registry, DependencySource::None);
    let request = Request::new("GET", "/zoo/cats/animals/123/habitats/88/sections/5");
    c.bench_function("dispatch", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&request))))
    });
}

criterion_group!(benches, bench_route_throughput, bench_dispatch);
criterion_main!(benches);

use cinerec::*;

fn show(label: &str, movies: &[Movie]) {
    println!("\n{}", label);
    if movies.is_empty() {
        println!("  (none available yet)");
    }
    for movie in movies {
        println!("  - {} (ID: {})", movie.title, movie.id);
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let movies = vec![
        Movie::new(1, "Heat")
            .with_genres(["Crime", "Drama"])
            .with_cast(["Al Pacino", "Robert De Niro"])
            .with_director("Michael Mann")
            .with_plot("A detective pursues a crew of bank robbers."),
        Movie::new(2, "Collateral")
            .with_genres(["Crime", "Thriller"])
            .with_cast(["Tom Cruise", "Jamie Foxx"])
            .with_director("Michael Mann")
            .with_plot("A cab driver is taken hostage by a hitman."),
        Movie::new(3, "Paddington")
            .with_genres(["Comedy", "Family"])
            .with_cast(["Ben Whishaw"])
            .with_director("Paul King")
            .with_plot("A bear from Peru looks for a home in London."),
        Movie::new(4, "Alien")
            .with_genres(["Horror"])
            .with_director("Ridley Scott")
            .with_plot("A spaceship crew is hunted by a creature."),
    ];

    let users = vec![User::new(1, "test_user"), User::new(2, "noir_fan")];

    let ratings = vec![
        Rating::new(1, 1, 4),
        Rating::new(1, 2, 5),
        Rating::new(2, 1, 5),
        Rating::new(2, 4, 4),
    ];

    let snapshot = CatalogSnapshot::new(movies, users, ratings, RatingScale::default())?;
    let recommender = Recommender::new(snapshot);

    show(
        "Content-based recommendations for Heat:",
        &recommender.content_based_recommendations(1, 10),
    );
    show(
        "Collaborative recommendations for test_user:",
        &recommender.collaborative_recommendations(1, 10),
    );
    show(
        "Hybrid recommendations for test_user seeded with Collateral:",
        &recommender.hybrid_recommendations(1, Some(2), 10),
    );

    Ok(())
}
